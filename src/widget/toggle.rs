//! API 密钥显示切换

use serde::{Deserialize, Serialize};

use crate::widget::view::View;

/// API 密钥输入框的显示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyVisibility {
    #[default]
    Masked,
    Plain,
}

impl KeyVisibility {
    pub fn from_visible(visible: bool) -> Self {
        if visible { Self::Plain } else { Self::Masked }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Plain)
    }

    /// 输入框的 `type` 属性
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Masked => "password",
            Self::Plain => "text",
        }
    }

    /// 切换按钮的图标名
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Masked => "eye",
            Self::Plain => "eye-off",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Masked => Self::Plain,
            Self::Plain => Self::Masked,
        }
    }
}

/// 切换密钥输入框的显示方式，返回切换后的状态
pub fn toggle_api_key<V: View + ?Sized>(view: &mut V) -> KeyVisibility {
    let next = view.api_key_visibility().toggled();
    view.set_api_key_visibility(next);
    next
}
