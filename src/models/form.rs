//! 表单输入

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::query::QueryRequest;

static LEADING_INT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?\d+)").expect("leading integer pattern is valid")
});

/// 从页面读取的原始字段值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    /// 问题输入框
    pub query: String,
    /// Top-K 下拉框的当前值
    pub top_k: String,
    /// API 密钥输入框（页面上可能不存在）
    pub api_key: Option<String>,
}

impl FormInput {
    pub fn new(query: impl Into<String>, top_k: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: top_k.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// 校验并构造查询请求
    ///
    /// 仅检查问题是否为空；Top-K 不做范围检查。
    pub fn to_request(&self) -> Result<QueryRequest> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Ok(QueryRequest {
            query: query.to_string(),
            top_k: parse_top_k(&self.top_k),
            api_key,
        })
    }
}

/// 按十进制解析开头的整数，忽略后续字符
///
/// 没有数字时返回 `None`，溢出时同样视为无法解析。
pub fn parse_top_k(value: &str) -> Option<i64> {
    LEADING_INT
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}
