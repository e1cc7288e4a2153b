//! 查询请求与响应
//!
//! 与后端 `/query` 接口交换的 JSON 结构。

use serde::{Deserialize, Deserializer, Serialize};

/// `null` 与缺失一样视为空列表
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 查询请求
///
/// 每次提交重新构造，不做持久化。`api_key` 为空时不出现在请求体中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// 去除首尾空白后的问题
    pub query: String,
    /// 检索片段数量，无法解析时序列化为 null
    pub top_k: Option<i64>,
    /// 可选 API 密钥
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub api_key: Option<String>,
}

/// 查询响应
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    /// 回答文本（类 Markdown）
    pub answer: String,
    /// 来源 URL，保持后端给出的顺序
    #[serde(deserialize_with = "null_as_empty")]
    pub sources: Vec<String>,
    /// 错误消息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn new(answer: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            answer: answer.into(),
            sources,
            error: None,
        }
    }
}

/// 非 2xx 响应体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// 后端健康检查结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendHealth {
    pub status: String,
}

impl BackendHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
