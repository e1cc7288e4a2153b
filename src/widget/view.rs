use crate::error::Result;
use crate::models::{FormInput, Region};
use crate::widget::toggle::KeyVisibility;

/// 页面元素约定
///
/// 控制器与渲染器只通过该 trait 操作页面，实现方负责把调用映射到具体元素
/// （见 `ElementIds`）。实现假定所有元素都存在。
#[cfg_attr(test, mockall::automock)]
pub trait View: Send {
    /// 读取问题、Top-K 与 API 密钥字段的当前值
    fn read_form(&self) -> FormInput;

    fn set_visible(&mut self, region: Region, visible: bool);

    /// 以 HTML 形式写入回答区域
    fn set_answer_html(&mut self, html: &str);

    fn clear_sources(&mut self);

    /// 追加一个新窗口打开的来源链接，文字为 URL 原文
    fn append_source(&mut self, url: &str) -> Result<()>;

    /// 来源列表为空时的占位项
    fn show_no_sources(&mut self, placeholder: &str);

    /// 以纯文本形式写入错误区域
    fn set_error_text(&mut self, message: &str);

    fn scroll_results_into_view(&mut self);

    fn api_key_visibility(&self) -> KeyVisibility;

    fn set_api_key_visibility(&mut self, visibility: KeyVisibility);
}
