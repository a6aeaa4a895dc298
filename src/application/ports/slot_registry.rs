//! Slot Registry Port - 生成槽位忙碌标记
//!
//! 每个可独立发起的生成目标（槽位）单独记录是否有请求在途。
//! 同一槽位至多一个在途请求；不同槽位互不影响。

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::asset::AssetKind;

/// 槽位错误
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Slot busy: {0}")]
    Busy(SlotKey),
}

/// 生成槽位标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum SlotKey {
    /// 生成大纲
    Outline,
    /// 续写章节
    MoreChapters,
    /// 黄金三章开篇大纲
    Opening,
    /// 重新生成第 i 章
    Regenerate(usize),
    /// 第 i 章节拍建议
    SuggestBeat(usize),
    /// 辅助设定生成
    Asset(AssetKind),
    /// 章节正文写作
    Chapter,
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotKey::Outline => write!(f, "outline"),
            SlotKey::MoreChapters => write!(f, "more_chapters"),
            SlotKey::Opening => write!(f, "opening"),
            SlotKey::Regenerate(i) => write!(f, "regenerate:{}", i),
            SlotKey::SuggestBeat(i) => write!(f, "suggest_beat:{}", i),
            SlotKey::Asset(kind) => write!(f, "asset:{}", kind),
            SlotKey::Chapter => write!(f, "chapter"),
        }
    }
}

/// Slot Registry Port
pub trait SlotRegistryPort: Send + Sync {
    /// 标记槽位忙碌；已忙碌时返回 Busy
    fn try_acquire(&self, workspace_id: &str, slot: SlotKey) -> Result<(), SlotError>;

    /// 释放槽位
    fn release(&self, workspace_id: &str, slot: SlotKey);

    fn is_busy(&self, workspace_id: &str, slot: SlotKey) -> bool;

    /// 工作区当前所有忙碌槽位
    fn busy_slots(&self, workspace_id: &str) -> Vec<SlotKey>;

    /// 清理工作区的所有槽位，返回清理数量
    fn clear_workspace(&self, workspace_id: &str) -> usize;
}

/// 槽位占用守卫
///
/// Drop 时释放槽位：成功、失败、panic 或请求 future 被丢弃都会清除忙碌标记
pub struct SlotGuard {
    registry: Arc<dyn SlotRegistryPort>,
    workspace_id: String,
    slot: SlotKey,
}

impl SlotGuard {
    pub fn acquire(
        registry: Arc<dyn SlotRegistryPort>,
        workspace_id: &str,
        slot: SlotKey,
    ) -> Result<Self, SlotError> {
        registry.try_acquire(workspace_id, slot)?;
        Ok(Self {
            registry,
            workspace_id: workspace_id.to_string(),
            slot,
        })
    }

    pub fn slot(&self) -> SlotKey {
        self.slot
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.registry.release(&self.workspace_id, self.slot);
    }
}

impl std::fmt::Debug for SlotGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotGuard")
            .field("workspace_id", &self.workspace_id)
            .field("slot", &self.slot)
            .finish()
    }
}
