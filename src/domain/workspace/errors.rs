//! Workspace - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("工作区不存在: {0}")]
    NotFound(String),

    #[error("工作区已存在: {0}")]
    AlreadyExists(String),

    #[error("章节下标越界: {index} (共 {len} 章)")]
    ChapterOutOfRange { index: usize, len: usize },

    /// 生成期间目标章节被移动或修改
    #[error("第 {} 章已被修改，结果已丢弃，请重试 | Chapter changed during generation.", .index + 1)]
    ChapterChanged { index: usize },
}
