//! Outline Context - 章节大纲限界上下文
//!
//! 职责:
//! - 章节条目（标题 + 节拍）
//! - 保序的纯编辑操作

mod aggregate;
mod entities;

pub use aggregate::{Outline, PLACEHOLDER_BEAT};
pub use entities::{OutlineEntry, OutlineField};
