//! 页面表单 DTO
//!
//! 页面以 `application/x-www-form-urlencoded` 提交的字段。

use serde::Deserialize;

use crate::models::FormInput;
use crate::widget::KeyVisibility;

/// 问答表单
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AskForm {
    /// 问题
    pub query: String,
    /// Top-K 下拉框取值
    pub top_k: String,
    /// API 密钥
    pub api_key: Option<String>,
    /// 密钥输入框当前是否明文显示
    pub api_key_visible: Option<String>,
}

impl AskForm {
    pub fn to_input(&self) -> FormInput {
        FormInput {
            query: self.query.clone(),
            top_k: self.top_k.clone(),
            api_key: self.api_key.clone(),
        }
    }

    pub fn key_visibility(&self) -> KeyVisibility {
        KeyVisibility::from_visible(self.api_key_visible.as_deref() == Some("true"))
    }
}
