//! API 模块
//!
//! 以服务端渲染方式托管问答页面，不依赖浏览器脚本。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::error::AppError;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::page_routes::create_page_router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// 编译页面模板并创建路由
///
/// 模板错误在启动时暴露，而不是在第一次请求时。
pub async fn initialize_api(app_state: AppState) -> Result<Router, AppError> {
    tracing::info!("Initializing page router...");
    crate::widget::page::templates()?;
    Ok(create_router(app_state))
}
