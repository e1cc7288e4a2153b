//! 问答表单组件
//!
//! 页面通过 `View` trait 暴露给控制器；`PageView` 是服务端渲染用的内存实现。

pub mod controller;
pub mod page;
pub mod renderer;
pub mod toggle;
pub mod view;

pub use controller::FormController;
pub use page::{PageView, SourceItem};
pub use renderer::{NO_SOURCES_PLACEHOLDER, ResultRenderer};
pub use toggle::{KeyVisibility, toggle_api_key};
pub use view::View;
