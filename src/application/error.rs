//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::generation_client::GenerationFailed;
use crate::application::ports::SlotError;
use crate::domain::creative::CreativeError;
use crate::domain::workspace::WorkspaceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误（请求前即拦截，不会发起生成）
    #[error("{0}")]
    ValidationError(String),

    /// 槽位已有在途请求
    #[error("请求进行中，请稍候。| A request for {0} is already in progress.")]
    SlotBusy(String),

    /// 生成失败（上游原因已记录日志）
    #[error("{0}")]
    GenerationFailed(String),

    /// 生成结果与当前状态冲突（已丢弃）
    #[error("{0}")]
    Conflict(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<WorkspaceError> for ApplicationError {
    fn from(err: WorkspaceError) -> Self {
        match err {
            WorkspaceError::NotFound(id) => Self::not_found("Workspace", id),
            WorkspaceError::AlreadyExists(id) => {
                Self::internal(format!("Workspace already exists: {}", id))
            }
            e @ WorkspaceError::ChapterOutOfRange { .. } => Self::ValidationError(e.to_string()),
            e @ WorkspaceError::ChapterChanged { .. } => Self::Conflict(e.to_string()),
        }
    }
}

impl From<CreativeError> for ApplicationError {
    fn from(err: CreativeError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<SlotError> for ApplicationError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::Busy(slot) => Self::SlotBusy(slot.to_string()),
        }
    }
}

impl From<GenerationFailed> for ApplicationError {
    fn from(err: GenerationFailed) -> Self {
        Self::GenerationFailed(err.to_string())
    }
}
