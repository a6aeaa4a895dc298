//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod generation_commands;
mod outline_commands;
mod workspace_commands;

pub mod handlers;

pub use generation_commands::*;
pub use outline_commands::*;
pub use workspace_commands::*;
