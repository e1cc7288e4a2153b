//! 表单控制器
//!
//! 一次提交：读取表单 → 校验 → 显示加载状态 → 请求后端 → 渲染结果或错误 →
//! 隐藏加载指示器。无论成功、请求失败、网络失败还是渲染出错（包括 panic），
//! 加载指示器都恰好隐藏一次。

use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::QueryClient;
use crate::error::Result;
use crate::models::{QueryRequest, Region};
use crate::widget::renderer::ResultRenderer;
use crate::widget::toggle::{KeyVisibility, toggle_api_key};
use crate::widget::view::View;

pub struct FormController<V: View> {
    view: V,
    client: Arc<dyn QueryClient>,
    renderer: ResultRenderer,
}

impl<V: View> FormController<V> {
    pub fn new(view: V, client: Arc<dyn QueryClient>) -> Self {
        Self::with_renderer(view, client, ResultRenderer::default())
    }

    pub fn with_renderer(view: V, client: Arc<dyn QueryClient>, renderer: ResultRenderer) -> Self {
        Self {
            view,
            client,
            renderer,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// 处理一次表单提交
    ///
    /// 返回的错误已经显示在错误区域中。
    pub async fn submit(&mut self) -> Result<()> {
        let submission_id = Uuid::new_v4();
        let input = self.view.read_form();

        let request = match input.to_request() {
            Ok(request) => request,
            Err(e) => {
                warn!(%submission_id, "Submission rejected: {}", e);
                self.show_error(&e.to_string());
                return Err(e);
            }
        };

        info!(
            %submission_id,
            top_k = ?request.top_k,
            with_api_key = request.api_key.is_some(),
            "Submitting query"
        );

        self.show_loading(true);
        let outcome = AssertUnwindSafe(self.fetch_and_render(&request))
            .catch_unwind()
            .await;
        self.show_loading(false);

        match outcome {
            Ok(Ok(())) => {
                info!(%submission_id, "Submission answered");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(%submission_id, "Submission failed: {}", e);
                Err(e)
            }
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// 切换 API 密钥输入框的显示方式
    pub fn toggle_api_key(&mut self) -> KeyVisibility {
        toggle_api_key(&mut self.view)
    }

    async fn fetch_and_render(&mut self, request: &QueryRequest) -> Result<()> {
        let result = match self.client.query(request).await {
            Ok(response) => self.renderer.render(&mut self.view, &response),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            self.show_error(&e.to_string());
        }
        result
    }

    fn show_loading(&mut self, loading: bool) {
        if loading {
            self.view.set_visible(Region::LoadingIndicator, true);
            self.view.set_visible(Region::ResultsContent, false);
            self.view.set_visible(Region::ErrorDisplay, false);
            self.view.set_visible(Region::ResultsCard, true);
        } else {
            self.view.set_visible(Region::LoadingIndicator, false);
        }
    }

    fn show_error(&mut self, message: &str) {
        self.view.set_visible(Region::ResultsCard, true);
        self.view.set_visible(Region::ResultsContent, false);
        self.view.set_visible(Region::ErrorDisplay, true);
        self.view.set_error_text(message);
        self.view.scroll_results_into_view();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockQueryClient;
    use crate::error::{AppError, EMPTY_QUERY_MESSAGE};
    use crate::models::{FormInput, QueryResponse};
    use crate::widget::view::MockView;
    use mockall::predicate::{always, eq, ne};
    use rstest::rstest;

    fn view_with_form(input: FormInput) -> MockView {
        let mut view = MockView::new();
        view.expect_read_form().return_const(input);
        view
    }

    /// 除加载指示器之外的区域切换与内容写入都放行
    fn allow_rendering(view: &mut MockView) {
        view.expect_set_visible()
            .with(ne(Region::LoadingIndicator), always())
            .return_const(());
        view.expect_set_visible()
            .with(eq(Region::LoadingIndicator), eq(true))
            .times(1)
            .return_const(());
        view.expect_set_answer_html().return_const(());
        view.expect_clear_sources().return_const(());
        view.expect_show_no_sources().return_const(());
        view.expect_append_source().returning(|_| Ok(()));
        view.expect_scroll_results_into_view().return_const(());
    }

    fn expect_loading_hidden_once(view: &mut MockView) {
        view.expect_set_visible()
            .with(eq(Region::LoadingIndicator), eq(false))
            .times(1)
            .return_const(());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    #[tokio::test]
    async fn test_blank_query_never_hits_network(#[case] query: &str) {
        let mut view = view_with_form(FormInput::new(query, "5"));
        view.expect_set_visible().with(always(), always()).return_const(());
        view.expect_set_error_text()
            .with(eq(EMPTY_QUERY_MESSAGE))
            .times(1)
            .return_const(());
        view.expect_scroll_results_into_view().times(1).return_const(());

        let mut client = MockQueryClient::new();
        client.expect_query().times(0);

        let mut controller = FormController::new(view, Arc::new(client));
        let err = controller.submit().await.unwrap_err();
        assert!(matches!(err, AppError::EmptyQuery));
    }

    #[tokio::test]
    async fn test_success_renders_and_hides_loading_once() {
        let mut view = view_with_form(FormInput::new(" what is top-k? ", "10").with_api_key("sk"));
        allow_rendering(&mut view);
        expect_loading_hidden_once(&mut view);
        view.expect_set_error_text().times(0);

        let mut client = MockQueryClient::new();
        client
            .expect_query()
            .withf(|request| {
                request.query == "what is top-k?"
                    && request.top_k == Some(10)
                    && request.api_key.as_deref() == Some("sk")
            })
            .times(1)
            .returning(|_| Ok(QueryResponse::new("answer", vec!["http://s/1".into()])));

        let mut controller = FormController::new(view, Arc::new(client));
        controller.submit().await.unwrap();
    }

    #[tokio::test]
    async fn test_request_error_shown_and_loading_hidden_once() {
        let mut view = view_with_form(FormInput::new("q", "5"));
        allow_rendering(&mut view);
        expect_loading_hidden_once(&mut view);
        view.expect_set_error_text()
            .with(eq("Missing query parameter"))
            .times(1)
            .return_const(());

        let mut client = MockQueryClient::new();
        client.expect_query().times(1).returning(|_| {
            Err(AppError::Request {
                status: 400,
                message: "Missing query parameter".into(),
            })
        });

        let mut controller = FormController::new(view, Arc::new(client));
        assert!(controller.submit().await.is_err());
    }

    #[tokio::test]
    async fn test_network_error_shown_verbatim() {
        let mut view = view_with_form(FormInput::new("q", "5"));
        allow_rendering(&mut view);
        expect_loading_hidden_once(&mut view);
        view.expect_set_error_text()
            .with(eq("connection refused"))
            .times(1)
            .return_const(());

        let mut client = MockQueryClient::new();
        client
            .expect_query()
            .returning(|_| Err(AppError::Network("connection refused".into())));

        let mut controller = FormController::new(view, Arc::new(client));
        assert!(matches!(
            controller.submit().await,
            Err(AppError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_render_error_shown_and_loading_hidden_once() {
        let mut view = view_with_form(FormInput::new("q", "5"));
        view.expect_set_visible()
            .with(ne(Region::LoadingIndicator), always())
            .return_const(());
        view.expect_set_visible()
            .with(eq(Region::LoadingIndicator), eq(true))
            .return_const(());
        expect_loading_hidden_once(&mut view);
        view.expect_set_answer_html().return_const(());
        view.expect_clear_sources().return_const(());
        view.expect_append_source()
            .returning(|_| Err(AppError::Render("list missing".into())));
        view.expect_scroll_results_into_view().return_const(());
        view.expect_set_error_text().times(1).return_const(());

        let mut client = MockQueryClient::new();
        client
            .expect_query()
            .returning(|_| Ok(QueryResponse::new("a", vec!["http://x".into()])));

        let mut controller = FormController::new(view, Arc::new(client));
        assert!(matches!(
            controller.submit().await,
            Err(AppError::Render(_))
        ));
    }

    /// 写入回答时 panic 的页面，记录加载指示器被隐藏的次数
    #[derive(Default)]
    struct PanickingView {
        loading_hidden: usize,
    }

    impl View for PanickingView {
        fn read_form(&self) -> FormInput {
            FormInput::new("q", "5")
        }

        fn set_visible(&mut self, region: Region, visible: bool) {
            if region == Region::LoadingIndicator && !visible {
                self.loading_hidden += 1;
            }
        }

        fn set_answer_html(&mut self, _html: &str) {
            panic!("answer element missing");
        }

        fn clear_sources(&mut self) {}

        fn append_source(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }

        fn show_no_sources(&mut self, _placeholder: &str) {}

        fn set_error_text(&mut self, _message: &str) {}

        fn scroll_results_into_view(&mut self) {}

        fn api_key_visibility(&self) -> KeyVisibility {
            KeyVisibility::Masked
        }

        fn set_api_key_visibility(&mut self, _visibility: KeyVisibility) {}
    }

    #[tokio::test]
    async fn test_loading_hidden_even_when_render_panics() {
        let mut client = MockQueryClient::new();
        client
            .expect_query()
            .returning(|_| Ok(QueryResponse::new("a", vec![])));

        let mut controller = FormController::new(PanickingView::default(), Arc::new(client));
        let panicked = AssertUnwindSafe(controller.submit()).catch_unwind().await;

        assert!(panicked.is_err());
        assert_eq!(controller.view().loading_hidden, 1);
    }

    #[tokio::test]
    async fn test_unparseable_top_k_still_submits() {
        let mut view = view_with_form(FormInput::new("q", "many"));
        allow_rendering(&mut view);
        expect_loading_hidden_once(&mut view);

        let mut client = MockQueryClient::new();
        client
            .expect_query()
            .withf(|request| request.top_k.is_none())
            .times(1)
            .returning(|_| Ok(QueryResponse::default()));

        let mut controller = FormController::new(view, Arc::new(client));
        controller.submit().await.unwrap();
    }

    #[test]
    fn test_toggle_api_key_flips_page() {
        use crate::config::config::AppConfig;
        use crate::widget::page::PageView;

        let page = PageView::from_config(&AppConfig::default());
        let mut controller = FormController::new(page, Arc::new(MockQueryClient::new()));

        assert_eq!(controller.toggle_api_key(), KeyVisibility::Plain);
        assert!(controller.view().render_page().unwrap().contains(r#"type="text""#));
        assert_eq!(controller.toggle_api_key(), KeyVisibility::Masked);
    }
}
