use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::client::QueryClient;
use crate::config::config::BackendConfig;
use crate::error::{AppError, Result};
use crate::models::{BackendHealth, ErrorBody, QueryRequest, QueryResponse};

/// 基于 reqwest 的后端客户端
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    client: reqwest::Client,
    query_url: String,
    health_url: String,
}

impl HttpQueryClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base_url = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            query_url: format!("{}{}", base_url, config.query_path),
            health_url: format!("{}{}", base_url, config.health_path),
        })
    }

    /// 仅指定后端地址，其余取默认值
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(&BackendConfig {
            base_url: base_url.to_string(),
            ..BackendConfig::default()
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

/// 从非 2xx 响应中提取错误消息
///
/// 响应体含 `error` 字段时使用该字段，否则生成通用状态码消息。
async fn request_error(response: reqwest::Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.is_empty() => AppError::Request { status, message },
        _ => AppError::from_status(status),
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        debug!(url = %self.query_url, top_k = ?request.top_k, "Posting query");

        let response = self
            .client
            .post(&self.query_url)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(request_error(response).await);
        }

        let body: QueryResponse = response.json().await?;
        debug!(sources = body.sources.len(), "Query answered");
        Ok(body)
    }

    async fn health(&self) -> Result<BackendHealth> {
        let response = self.client.get(&self.health_url).send().await?;

        if !response.status().is_success() {
            return Err(request_error(response).await);
        }

        Ok(response.json().await?)
    }
}
