//! In-Memory Slot Registry Implementation

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::application::ports::{SlotError, SlotKey, SlotRegistryPort};

/// 内存槽位注册表
///
/// (workspace_id, slot) -> 开始时间；存在即忙碌
pub struct InMemorySlotRegistry {
    busy: DashMap<(String, SlotKey), DateTime<Utc>>,
}

impl InMemorySlotRegistry {
    pub fn new() -> Self {
        Self {
            busy: DashMap::new(),
        }
    }
}

impl Default for InMemorySlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotRegistryPort for InMemorySlotRegistry {
    fn try_acquire(&self, workspace_id: &str, slot: SlotKey) -> Result<(), SlotError> {
        match self.busy.entry((workspace_id.to_string(), slot)) {
            Entry::Occupied(_) => {
                tracing::debug!(workspace_id = %workspace_id, slot = %slot, "Slot already busy");
                Err(SlotError::Busy(slot))
            }
            Entry::Vacant(entry) => {
                entry.insert(Utc::now());
                tracing::debug!(workspace_id = %workspace_id, slot = %slot, "Slot acquired");
                Ok(())
            }
        }
    }

    fn release(&self, workspace_id: &str, slot: SlotKey) {
        if let Some((_, started_at)) = self.busy.remove(&(workspace_id.to_string(), slot)) {
            let elapsed_ms = (Utc::now() - started_at).num_milliseconds();
            tracing::debug!(
                workspace_id = %workspace_id,
                slot = %slot,
                elapsed_ms = elapsed_ms,
                "Slot released"
            );
        }
    }

    fn is_busy(&self, workspace_id: &str, slot: SlotKey) -> bool {
        self.busy.contains_key(&(workspace_id.to_string(), slot))
    }

    fn busy_slots(&self, workspace_id: &str) -> Vec<SlotKey> {
        self.busy
            .iter()
            .filter(|e| e.key().0 == workspace_id)
            .map(|e| e.key().1)
            .collect()
    }

    fn clear_workspace(&self, workspace_id: &str) -> usize {
        let before = self.busy.len();
        self.busy.retain(|(id, _), _| id != workspace_id);
        let cleared = before.saturating_sub(self.busy.len());
        if cleared > 0 {
            tracing::debug!(workspace_id = %workspace_id, cleared = cleared, "Workspace slots cleared");
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SlotGuard;
    use crate::domain::asset::AssetKind;
    use std::future::Future;
    use std::sync::Arc;

    #[test]
    fn test_same_slot_cannot_be_acquired_twice() {
        let registry = InMemorySlotRegistry::new();

        assert!(registry.try_acquire("ws", SlotKey::Outline).is_ok());
        assert!(matches!(
            registry.try_acquire("ws", SlotKey::Outline),
            Err(SlotError::Busy(SlotKey::Outline))
        ));

        registry.release("ws", SlotKey::Outline);
        assert!(registry.try_acquire("ws", SlotKey::Outline).is_ok());
    }

    #[test]
    fn test_distinct_slots_are_independent() {
        let registry = InMemorySlotRegistry::new();

        assert!(registry.try_acquire("ws", SlotKey::Regenerate(1)).is_ok());
        assert!(registry.try_acquire("ws", SlotKey::Regenerate(2)).is_ok());
        assert!(registry.try_acquire("ws", SlotKey::SuggestBeat(1)).is_ok());
        assert!(registry
            .try_acquire("ws", SlotKey::Asset(AssetKind::Synopsis))
            .is_ok());
        assert!(registry.try_acquire("other", SlotKey::Regenerate(1)).is_ok());

        let mut busy = registry.busy_slots("ws");
        busy.sort_by_key(|s| s.to_string());
        assert_eq!(busy.len(), 4);
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let registry: Arc<dyn SlotRegistryPort> = Arc::new(InMemorySlotRegistry::new());

        {
            let guard = SlotGuard::acquire(registry.clone(), "ws", SlotKey::Chapter).unwrap();
            assert_eq!(guard.slot(), SlotKey::Chapter);
            assert!(registry.is_busy("ws", SlotKey::Chapter));
            assert!(SlotGuard::acquire(registry.clone(), "ws", SlotKey::Chapter).is_err());
        }

        assert!(!registry.is_busy("ws", SlotKey::Chapter));
    }

    #[test]
    fn test_guard_releases_when_future_is_dropped() {
        let registry: Arc<dyn SlotRegistryPort> = Arc::new(InMemorySlotRegistry::new());
        let registry_for_future = registry.clone();

        let future = async move {
            let _guard = SlotGuard::acquire(registry_for_future, "ws", SlotKey::Opening)?;
            std::future::pending::<()>().await;
            Ok::<(), SlotError>(())
        };
        let mut future = Box::pin(future);

        // 轮询一次使其持有槽位，然后丢弃
        let waker = futures_util::task::noop_waker();
        let mut cx = std::task::Context::from_waker(&waker);
        assert!(future.as_mut().poll(&mut cx).is_pending());
        assert!(registry.is_busy("ws", SlotKey::Opening));

        drop(future);
        assert!(!registry.is_busy("ws", SlotKey::Opening));
    }

    #[test]
    fn test_clear_workspace() {
        let registry = InMemorySlotRegistry::new();
        registry.try_acquire("ws", SlotKey::Outline).unwrap();
        registry.try_acquire("ws", SlotKey::Chapter).unwrap();
        registry.try_acquire("other", SlotKey::Outline).unwrap();

        assert_eq!(registry.clear_workspace("ws"), 2);
        assert!(registry.busy_slots("ws").is_empty());
        assert!(registry.is_busy("other", SlotKey::Outline));
    }
}
