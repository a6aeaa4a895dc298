//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod generation_handlers;
mod outline_handlers;
mod slot_executor;
mod workspace_handlers;

pub use generation_handlers::*;
pub use outline_handlers::*;
pub use slot_executor::{BusySlot, SlotExecutor};
pub use workspace_handlers::*;
