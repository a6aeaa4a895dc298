//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, GenerationProvider};
use crate::application::generation_client::DEFAULT_TEMPERATURE;
use crate::application::ports::MAX_IDLE_TIMEOUT_SECS;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// API Key 回退环境变量
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NOVELIST_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NOVELIST_SERVER__PORT=8080`
/// - `NOVELIST_GENERATION__PROVIDER=fake`
/// - `NOVELIST_GENERATION__STANDARD_MODEL=gemini-2.5-flash`
/// - `NOVELIST_WORKSPACE__IDLE_EXPIRE_SECS=3600`
///
/// `generation.api_key` 为空时读取 `GEMINI_API_KEY`。
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("generation.provider", "gemini")?
        .set_default("generation.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("generation.api_key", "")?
        .set_default("generation.standard_model", "gemini-2.5-flash")?
        .set_default("generation.advanced_model", "gemini-2.5-pro")?
        .set_default("generation.temperature", f64::from(DEFAULT_TEMPERATURE))?
        .set_default("generation.timeout_secs", 300)?
        .set_default("workspace.idle_expire_secs", 86400)?
        .set_default("workspace.sweep_interval_secs", 600)?
        .set_default("workspace.max_chapter_count", 100)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: NOVELIST_GENERATION__API_KEY=xxx
    builder = builder.add_source(
        Environment::with_prefix("NOVELIST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_api_key_fallback(&mut app_config, std::env::var(API_KEY_ENV).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 配置中未给出 API Key 时使用回退值
fn apply_api_key_fallback(config: &mut AppConfig, fallback: Option<String>) {
    if !config.generation.api_key.trim().is_empty() {
        return;
    }
    if let Some(key) = fallback.filter(|k| !k.trim().is_empty()) {
        config.generation.api_key = key;
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let generation = &config.generation;
    if generation.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Generation base URL cannot be empty".to_string(),
        ));
    }

    if generation.provider == GenerationProvider::Gemini && generation.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "Generation API key is required for the gemini provider (set generation.api_key or {})",
            API_KEY_ENV
        )));
    }

    if !(0.0..=2.0).contains(&generation.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "Generation temperature must be within 0..=2, got {}",
            generation.temperature
        )));
    }

    if config.workspace.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Workspace sweep interval cannot be 0".to_string(),
        ));
    }

    if config.workspace.idle_expire_secs > MAX_IDLE_TIMEOUT_SECS {
        return Err(ConfigError::ValidationError(format!(
            "Workspace idle expire must be at most {}s, got {}",
            MAX_IDLE_TIMEOUT_SECS, config.workspace.idle_expire_secs
        )));
    }

    if config.workspace.max_chapter_count == 0 {
        return Err(ConfigError::ValidationError(
            "Max chapter count cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    if let Some(dir) = &config.server.static_files {
        tracing::info!("Static Files: {:?}", dir);
    }
    tracing::info!("Generation Provider: {}", config.generation.provider);
    tracing::info!("Generation Base URL: {}", config.generation.base_url);
    tracing::info!(
        "Models: standard={}, advanced={}",
        config.generation.standard_model,
        config.generation.advanced_model
    );
    tracing::info!("Temperature: {}", config.generation.temperature);
    tracing::info!("Generation Timeout: {}s", config.generation.timeout_secs);
    tracing::info!("Workspace Idle Expire: {}s", config.workspace.idle_expire_secs);
    tracing::info!("Workspace Sweep Interval: {}s", config.workspace.sweep_interval_secs);
    tracing::info!("Max Chapter Count: {}", config.workspace.max_chapter_count);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
