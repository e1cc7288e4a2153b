//! Page Routes
//!
//! 问答页面及表单提交路由。

use crate::api::handlers::page_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建页面路由器
pub fn create_page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/ask", post(ask))
        .route("/toggle-api-key", post(toggle_key))
}
