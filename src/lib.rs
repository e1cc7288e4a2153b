//! Askpanel - 检索增强问答服务的提问组件
//!
//! 读取问题与 Top-K，提交到后端 `/query` 接口，并把回答与来源链接渲染到页面。
//! 回答文本经过一个轻量的类 Markdown 格式化器转换为 HTML。

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod observability;
pub mod widget;
