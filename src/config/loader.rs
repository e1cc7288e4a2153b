use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "ASKPANEL_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. ./config.toml
    /// 2. 环境变量（`ASKPANEL_` 前缀，嵌套键以 `__` 分隔）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.backend.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingBackendUrl);
        }

        if config.form.top_k_options.is_empty() {
            return Err(ConfigValidationError::EmptyTopKOptions);
        }

        if !config
            .form
            .top_k_options
            .contains(&config.form.default_top_k)
        {
            return Err(ConfigValidationError::UnknownDefaultTopK(
                config.form.default_top_k,
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("后端服务地址未配置")]
    MissingBackendUrl,

    #[error("Top-K 选项不能为空")]
    EmptyTopKOptions,

    #[error("默认 Top-K {0} 不在可选项中")]
    UnknownDefaultTopK(u32),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
