//! DTO 模块
//!
//! 定义 Web 层的请求数据结构。

pub mod page_dto;

pub use page_dto::AskForm;
