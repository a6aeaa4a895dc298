//! Workspace - 创作工作区
//!
//! 聚合一个会话内的创作参数、大纲与生成内容

mod aggregate;
mod errors;

pub use aggregate::{Workspace, DEFAULT_CHAPTER_COUNT};
pub use errors::WorkspaceError;
