//! 查询客户端模块
//!
//! 表单唯一的外部协作方：后端 `/query` 接口。

pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BackendHealth, QueryRequest, QueryResponse};

pub use http::HttpQueryClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// 提交一次查询
    ///
    /// 非 2xx 返回 `AppError::Request`，传输或解析失败返回 `AppError::Network`。
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;

    /// 探测后端健康状态
    async fn health(&self) -> Result<BackendHealth>;
}
