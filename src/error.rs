//! 错误处理模块
//!
//! 定义提交流程与 Web 层共用的错误类型。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 提交表单时显示给用户的校验提示
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a question.";

/// 应用程序错误类型
///
/// `Display` 输出即为错误区域中展示给用户的原文。
#[derive(Error, Debug)]
pub enum AppError {
    /// 查询为空（去除首尾空白后）
    #[error("Please enter a question.")]
    EmptyQuery,

    /// 后端返回非 2xx 状态码
    #[error("{message}")]
    Request { status: u16, message: String },

    /// 网络或响应解析失败
    #[error("{0}")]
    Network(String),

    /// 渲染失败（视图写入或页面模板）
    #[error("渲染失败: {0}")]
    Render(String),
}

impl AppError {
    /// 根据状态码生成通用请求错误
    pub fn from_status(status: u16) -> Self {
        AppError::Request {
            status,
            message: format!("HTTP error! Status: {}", status),
        }
    }

    /// 是否为本地校验失败（请求未发出）
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptyQuery)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

impl From<minijinja::Error> for AppError {
    fn from(e: minijinja::Error) -> Self {
        AppError::Render(e.to_string())
    }
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let body = Json(ErrorResponse::new(&code, &self.to_string()));
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::EmptyQuery => (400, "BAD_REQUEST".to_string()),
            AppError::Request { .. } => (502, "UPSTREAM_ERROR".to_string()),
            AppError::Network(_) => (503, "SERVICE_UNAVAILABLE".to_string()),
            AppError::Render(_) => (500, "RENDER_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
