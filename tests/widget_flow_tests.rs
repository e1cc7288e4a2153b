// End-to-end tests for the question widget
//
// Tests cover:
// - Submission against a stubbed backend
// - Error display for backend and validation failures
// - Served page round trip through the router

use std::sync::Arc;

use askpanel::api::{app_state::AppState, create_router};
use askpanel::client::HttpQueryClient;
use askpanel::config::config::AppConfig;
use askpanel::error::AppError;
use askpanel::models::{DisplayMode, FormInput};
use askpanel::observability::AppMetrics;
use askpanel::widget::{FormController, NO_SOURCES_PLACEHOLDER, PageView, SourceItem};
use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.backend.base_url = server.uri();
    config
}

fn controller(config: &AppConfig, input: FormInput) -> FormController<PageView> {
    let client = Arc::new(HttpQueryClient::new(&config.backend).unwrap());
    let page = PageView::from_config(config).with_form(input);
    FormController::new(page, client)
}

#[tokio::test]
async fn test_submission_renders_answer_from_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({"query": "How are chunks ranked?", "top_k": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "By **cosine** similarity.\n\nSee http://docs.example/rank for more.",
            "sources": ["http://docs.example/rank", "http://docs.example/embed"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut controller = controller(&config, FormInput::new("How are chunks ranked?", "10"));
    controller.submit().await.unwrap();

    let page = controller.into_view();
    assert_eq!(page.mode(), DisplayMode::Success);
    assert_eq!(
        page.answer_html(),
        r#"<p>By <strong>cosine</strong> similarity.</p><p>See <a href="http://docs.example/rank" target="_blank">http://docs.example/rank</a> for more.</p>"#
    );
    assert_eq!(
        page.sources(),
        &[
            SourceItem::Link("http://docs.example/rank".into()),
            SourceItem::Link("http://docs.example/embed".into()),
        ]
    );
    assert!(page.error_text().is_empty());
}

#[rstest]
#[case::empty(json!({"answer": "No idea.", "sources": []}))]
#[case::null(json!({"answer": "No idea.", "sources": null}))]
#[case::missing(json!({"answer": "No idea."}))]
#[tokio::test]
async fn test_empty_sources_show_placeholder(#[case] body: serde_json::Value) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut controller = controller(&config, FormInput::new("anything?", "5"));
    controller.submit().await.unwrap();

    assert_eq!(controller.view().mode(), DisplayMode::Success);
    assert_eq!(
        controller.view().sources(),
        &[SourceItem::Placeholder(NO_SOURCES_PLACEHOLDER.into())]
    );
}

#[tokio::test]
async fn test_backend_error_reaches_error_display() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "vector index offline"})))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut controller = controller(&config, FormInput::new("q", "5"));
    let err = controller.submit().await.unwrap_err();

    assert!(matches!(err, AppError::Request { status: 500, .. }));
    let page = controller.view();
    assert_eq!(page.mode(), DisplayMode::Error);
    assert_eq!(page.error_text(), "vector index offline");
    assert!(!page.visibility().loading_indicator);
}

#[tokio::test]
async fn test_blank_question_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut controller = controller(&config, FormInput::new("  ", "5"));
    assert!(controller.submit().await.is_err());
    assert_eq!(controller.view().error_text(), "Please enter a question.");
}

#[tokio::test]
async fn test_served_page_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({"query": "hi", "top_k": 15, "api_key": "sk-live"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "_hello_",
            "sources": ["http://s.example/1"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = Arc::new(HttpQueryClient::new(&config.backend).unwrap());
    let app = create_router(AppState::new(config, client, Arc::new(AppMetrics::default())));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ask")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("query=hi&top_k=15&api_key=sk-live"))
                .unwrap(),
        )
        .await
        .unwrap();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<p><em>hello</em></p>"));
    assert!(html.contains(&format!(
        r#"href="{}""#,
        minijinja::HtmlEscape("http://s.example/1")
    )));
    assert!(html.contains(r#"<option value="15" selected>15</option>"#));
}
