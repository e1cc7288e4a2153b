//! 数据模型模块
//!
//! 定义表单输入、查询请求/响应与显示状态。

pub mod display;
pub mod form;
pub mod query;

pub use display::{DisplayMode, Region, Visibility};
pub use form::{FormInput, parse_top_k};
pub use query::{BackendHealth, ErrorBody, QueryRequest, QueryResponse};
