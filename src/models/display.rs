//! 显示状态
//!
//! 页面只保存各区域的可见性标志，`DisplayMode` 由标志推导得出。

use serde::{Deserialize, Serialize};

/// 可切换可见性的页面区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// 结果卡片（包含以下三个区域）
    ResultsCard,
    /// 加载指示器
    LoadingIndicator,
    /// 回答与来源
    ResultsContent,
    /// 错误信息
    ErrorDisplay,
}

/// 各区域的可见性，初始全部隐藏
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Visibility {
    pub results_card: bool,
    pub loading_indicator: bool,
    pub results_content: bool,
    pub error_display: bool,
}

impl Visibility {
    pub fn get(&self, region: Region) -> bool {
        match region {
            Region::ResultsCard => self.results_card,
            Region::LoadingIndicator => self.loading_indicator,
            Region::ResultsContent => self.results_content,
            Region::ErrorDisplay => self.error_display,
        }
    }

    pub fn set(&mut self, region: Region, visible: bool) {
        match region {
            Region::ResultsCard => self.results_card = visible,
            Region::LoadingIndicator => self.loading_indicator = visible,
            Region::ResultsContent => self.results_content = visible,
            Region::ErrorDisplay => self.error_display = visible,
        }
    }

    /// 推导当前显示模式
    pub fn mode(&self) -> DisplayMode {
        if !self.results_card {
            DisplayMode::Idle
        } else if self.loading_indicator {
            DisplayMode::Loading
        } else if self.error_display {
            DisplayMode::Error
        } else if self.results_content {
            DisplayMode::Success
        } else {
            DisplayMode::Idle
        }
    }
}

/// 显示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Idle,
    Loading,
    Success,
    Error,
}
