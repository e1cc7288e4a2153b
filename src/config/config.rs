use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 后端服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// 后端服务地址
    pub base_url: String,
    /// 查询接口路径
    pub query_path: String,
    /// 健康检查接口路径
    pub health_path: String,
    /// 请求超时（秒），未设置时不限时
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            query_path: "/query".into(),
            health_path: "/health".into(),
            timeout_secs: None,
        }
    }
}

/// 表单配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// 默认 Top-K
    pub default_top_k: u32,
    /// Top-K 下拉选项
    pub top_k_options: Vec<u32>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            top_k_options: vec![3, 5, 10, 15],
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 文本格式化配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormatterConfig {
    /// 先转义 HTML 再应用格式规则
    pub hardened: bool,
}

/// 页面元素标识
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElementIds {
    pub form: String,
    pub query_input: String,
    pub api_key_input: String,
    pub api_key_toggle: String,
    pub top_k_selector: String,
    pub results_card: String,
    pub loading_indicator: String,
    pub results_content: String,
    pub answer_text: String,
    pub sources_list: String,
    pub error_display: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            form: "queryForm".into(),
            query_input: "queryInput".into(),
            api_key_input: "apiKeyInput".into(),
            api_key_toggle: "toggleApiKey".into(),
            top_k_selector: "topkSelector".into(),
            results_card: "resultsCard".into(),
            loading_indicator: "loadingIndicator".into(),
            results_content: "resultsContent".into(),
            answer_text: "answerText".into(),
            sources_list: "sourcesList".into(),
            error_display: "errorDisplay".into(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 后端服务配置
    pub backend: BackendConfig,
    /// 表单配置
    pub form: FormConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 文本格式化配置
    pub formatter: FormatterConfig,
    /// 页面元素标识
    pub elements: ElementIds,
}

