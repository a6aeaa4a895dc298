//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::generation_client::DEFAULT_TEMPERATURE;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 生成模型配置
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 工作区配置
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 前端静态文件目录，未设置则不托管
    #[serde(default)]
    pub static_files: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 生成服务提供方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    /// Gemini HTTP API
    #[default]
    Gemini,
    /// 离线固定输出（演示、联调）
    Fake,
}

impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// 生成模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub provider: GenerationProvider,

    /// API 基础 URL
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,

    /// API Key，为空时回退到 `GEMINI_API_KEY`
    #[serde(default)]
    pub api_key: String,

    /// 常规任务模型
    #[serde(default = "default_standard_model")]
    pub standard_model: String,

    /// 高级任务模型（章节正文）
    #[serde(default = "default_advanced_model")]
    pub advanced_model: String,

    /// 自由文本任务的采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 请求超时时间（秒）
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_standard_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_advanced_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_generation_timeout() -> u64 {
    300
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            base_url: default_generation_base_url(),
            api_key: String::new(),
            standard_model: default_standard_model(),
            advanced_model: default_advanced_model(),
            temperature: default_temperature(),
            timeout_secs: default_generation_timeout(),
        }
    }
}

/// 工作区配置
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    /// 空闲过期时间（秒）
    #[serde(default = "default_idle_expire")]
    pub idle_expire_secs: u64,

    /// 回收扫描间隔（秒）
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// 单次大纲最多章节数
    #[serde(default = "default_max_chapter_count")]
    pub max_chapter_count: u32,
}

fn default_idle_expire() -> u64 {
    86400 // 24 小时
}

fn default_sweep_interval() -> u64 {
    600
}

fn default_max_chapter_count() -> u32 {
    100
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            idle_expire_secs: default_idle_expire(),
            sweep_interval_secs: default_sweep_interval(),
            max_chapter_count: default_max_chapter_count(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.generation.provider, GenerationProvider::Gemini);
        assert_eq!(config.generation.standard_model, "gemini-2.5-flash");
        assert_eq!(config.generation.advanced_model, "gemini-2.5-pro");
        assert_eq!(config.workspace.max_chapter_count, 100);
        assert_eq!(config.generation.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_provider_from_lowercase() {
        let provider: GenerationProvider = serde_json::from_str("\"fake\"").unwrap();
        assert_eq!(provider, GenerationProvider::Fake);
        assert_eq!(provider.to_string(), "fake");
    }
}
