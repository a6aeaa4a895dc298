//! Worker Layer - Background Task Processing
//!
//! 实现 WorkspaceSweeper，回收空闲工作区

mod workspace_sweeper;

pub use workspace_sweeper::{WorkspaceSweeper, WorkspaceSweeperConfig};
