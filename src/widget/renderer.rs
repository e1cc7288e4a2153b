use tracing::debug;

use crate::error::Result;
use crate::format::TextFormatter;
use crate::models::{QueryResponse, Region};
use crate::widget::view::View;

/// 来源为空时的占位文字
pub const NO_SOURCES_PLACEHOLDER: &str = "No sources found";

/// 结果渲染器
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRenderer {
    formatter: TextFormatter,
}

impl ResultRenderer {
    pub fn new(formatter: TextFormatter) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &TextFormatter {
        &self.formatter
    }

    /// 显示回答与来源，并把结果区域滚动到可见位置
    pub fn render<V: View + ?Sized>(&self, view: &mut V, response: &QueryResponse) -> Result<()> {
        view.set_visible(Region::ResultsCard, true);
        view.set_visible(Region::ErrorDisplay, false);
        view.set_visible(Region::ResultsContent, true);

        view.set_answer_html(&self.formatter.format(&response.answer));

        view.clear_sources();
        if response.sources.is_empty() {
            view.show_no_sources(NO_SOURCES_PLACEHOLDER);
        } else {
            for source in &response.sources {
                view.append_source(source)?;
            }
        }
        debug!(sources = response.sources.len(), "Rendered result");

        view.scroll_results_into_view();
        Ok(())
    }
}
