use crate::client::QueryClient;
use crate::config::config::AppConfig;
use crate::format::TextFormatter;
use crate::observability::AppMetrics;
use crate::widget::{PageView, ResultRenderer};
use std::sync::Arc;

/// Application state shared by the page handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration (element ids, Top-K options)
    pub config: Arc<AppConfig>,
    /// Backend client shared by all submissions
    pub client: Arc<dyn QueryClient>,
    /// Result renderer with the configured formatter
    pub renderer: ResultRenderer,
    /// Submission counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("client", &"Arc<dyn QueryClient>")
            .field("renderer", &self.renderer)
            .field("metrics", &"Arc<AppMetrics>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, client: Arc<dyn QueryClient>, metrics: Arc<AppMetrics>) -> Self {
        let formatter = if config.formatter.hardened {
            TextFormatter::hardened()
        } else {
            TextFormatter::new()
        };

        Self {
            config: Arc::new(config),
            client,
            renderer: ResultRenderer::new(formatter),
            metrics,
        }
    }

    /// A fresh page in its idle state
    pub fn blank_page(&self) -> PageView {
        PageView::from_config(&self.config)
    }
}
