//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod options_queries;
mod workspace_queries;

pub mod handlers;

pub use options_queries::*;
pub use workspace_queries::*;
