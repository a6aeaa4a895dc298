//! Domain Layer - 领域层
//!
//! 包含以下限界上下文:
//! - Creative Context: 创作参数与核心设定组装
//! - Outline Context: 章节大纲
//! - Asset Context: 生成内容
//! - Workspace: 会话聚合根
//!
//! 以及共享的提示词模板（prompt）

pub mod asset;
pub mod creative;
pub mod outline;
pub mod prompt;
pub mod workspace;
