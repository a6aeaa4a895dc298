//! Memory Layer - In-Memory State Management
//!
//! 实现 WorkspaceManager 和 SlotRegistry，管理创作工作区和生成槽位的内存状态

mod slot_registry;
mod workspace_manager;

pub use slot_registry::InMemorySlotRegistry;
pub use workspace_manager::InMemoryWorkspaceManager;
