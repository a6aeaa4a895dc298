//! Generation Engine Port - 文本生成引擎抽象
//!
//! 唯一的“调用生成 API”原语，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// 生成引擎错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 模型档位
///
/// 章节正文使用高级模型，其余请求使用标准模型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Standard,
    Advanced,
}

/// 生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 用户提示词
    pub prompt: String,
    /// 系统指令
    pub system_instruction: Option<String>,
    /// 采样温度（None 使用服务端默认值）
    pub temperature: Option<f32>,
    /// 结构化输出约束（Some 时要求返回 JSON）
    pub response_schema: Option<Value>,
    pub tier: ModelTier,
}

impl GenerationRequest {
    /// 自由文本请求
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            temperature: None,
            response_schema: None,
            tier: ModelTier::Standard,
        }
    }

    /// 结构化 JSON 请求
    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            response_schema: Some(schema),
            ..Self::text(prompt)
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_tier(mut self, tier: ModelTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn is_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Generation Engine Port
///
/// 外部生成 API 的抽象接口：返回原始文本（结构化请求返回 JSON 文本，由调用方解析校验）
#[async_trait]
pub trait GenerationEnginePort: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// 检查生成服务是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
