use axum::{Form, extract::State, response::Html};
use std::time::Instant;
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::page_dto::AskForm},
    error::AppError,
    widget::{FormController, PageView, toggle_api_key},
};

/// 初始页面
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.blank_page().render_page()?))
}

/// 提交问题
///
/// 在新的页面状态上运行一次表单提交，错误直接显示在页面的错误区域中。
pub async fn ask(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> Result<Html<String>, AppError> {
    let page = state
        .blank_page()
        .with_form(form.to_input())
        .with_key_visibility(form.key_visibility());

    let mut controller =
        FormController::with_renderer(page, state.client.clone(), state.renderer);

    let started = Instant::now();
    let outcome = controller.submit().await;
    state
        .metrics
        .record_submission(&outcome, started.elapsed().as_millis() as u64);

    Ok(Html(controller.into_view().render_page()?))
}

/// 切换 API 密钥的显示方式，保留已填写的字段
pub async fn toggle_key(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> Result<Html<String>, AppError> {
    let mut page: PageView = state
        .blank_page()
        .with_form(form.to_input())
        .with_key_visibility(form.key_visibility());

    let visibility = toggle_api_key(&mut page);
    debug!(?visibility, "API key visibility toggled");

    Ok(Html(page.render_page()?))
}
