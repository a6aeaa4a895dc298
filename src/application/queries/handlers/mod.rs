//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod options_handlers;
mod workspace_handlers;

pub use options_handlers::*;
pub use workspace_handlers::*;
