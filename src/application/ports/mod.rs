//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod generation_engine;
mod slot_registry;
mod workspace_manager;

pub use generation_engine::{GenerationEnginePort, GenerationError, GenerationRequest, ModelTier};
pub use slot_registry::{SlotError, SlotGuard, SlotKey, SlotRegistryPort};
pub use workspace_manager::{WorkspaceManagerPort, WorkspaceUpdate, MAX_IDLE_TIMEOUT_SECS};
