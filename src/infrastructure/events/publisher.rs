//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现：每个工作区一个 broadcast 通道

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::application::ports::SlotKey;
use crate::domain::asset::AssetKind;

const CHANNEL_CAPACITY: usize = 100;

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 槽位忙碌状态变更
    SlotStateChanged {
        workspace_id: String,
        slot: SlotKey,
        busy: bool,
    },
    /// 大纲变更
    OutlineChanged {
        workspace_id: String,
        total_chapters: usize,
    },
    /// 设定/正文变更
    AssetChanged {
        workspace_id: String,
        kind: AssetKind,
    },
    /// 生成失败
    GenerationFailed {
        workspace_id: String,
        slot: SlotKey,
        error: String,
    },
    /// 工作区关闭
    WorkspaceClosed {
        workspace_id: String,
        reason: String,
    },
}

/// 事件发布器
pub struct EventPublisher {
    /// workspace_id -> broadcast sender
    workspace_channels: DashMap<String, broadcast::Sender<WsEvent>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            workspace_channels: DashMap::new(),
        }
    }

    /// 注册工作区的事件通道（已存在则复用）
    pub fn register_workspace(&self, workspace_id: &str) -> broadcast::Receiver<WsEvent> {
        self.workspace_channels
            .entry(workspace_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// 取消注册工作区；仍有订阅者时保留通道
    pub fn unregister_workspace(&self, workspace_id: &str) {
        self.workspace_channels
            .remove_if(workspace_id, |_, sender| sender.receiver_count() == 0);
    }

    /// 强制移除工作区通道（工作区关闭时）
    pub fn remove_workspace(&self, workspace_id: &str) {
        self.workspace_channels.remove(workspace_id);
    }

    pub fn publish_slot_state(&self, workspace_id: &str, slot: SlotKey, busy: bool) {
        self.publish_to_workspace(
            workspace_id,
            WsEvent::SlotStateChanged {
                workspace_id: workspace_id.to_string(),
                slot,
                busy,
            },
        );
    }

    pub fn publish_outline_changed(&self, workspace_id: &str, total_chapters: usize) {
        self.publish_to_workspace(
            workspace_id,
            WsEvent::OutlineChanged {
                workspace_id: workspace_id.to_string(),
                total_chapters,
            },
        );
    }

    pub fn publish_asset_changed(&self, workspace_id: &str, kind: AssetKind) {
        self.publish_to_workspace(
            workspace_id,
            WsEvent::AssetChanged {
                workspace_id: workspace_id.to_string(),
                kind,
            },
        );
    }

    /// 发布生成失败事件
    pub fn publish_generation_failed(&self, workspace_id: &str, slot: SlotKey, error: &str) {
        self.publish_to_workspace(
            workspace_id,
            WsEvent::GenerationFailed {
                workspace_id: workspace_id.to_string(),
                slot,
                error: error.to_string(),
            },
        );
    }

    /// 发布工作区关闭事件
    pub fn publish_workspace_closed(&self, workspace_id: &str, reason: &str) {
        self.publish_to_workspace(
            workspace_id,
            WsEvent::WorkspaceClosed {
                workspace_id: workspace_id.to_string(),
                reason: reason.to_string(),
            },
        );
    }

    /// 发布事件到指定工作区
    fn publish_to_workspace(&self, workspace_id: &str, event: WsEvent) {
        if let Some(sender) = self.workspace_channels.get(workspace_id) {
            if let Err(e) = sender.send(event) {
                tracing::debug!(
                    workspace_id = %workspace_id,
                    error = %e,
                    "Failed to publish event (no receivers)"
                );
            }
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_reach_workspace_subscribers() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.register_workspace("ws");

        publisher.publish_slot_state("ws", SlotKey::Outline, true);
        publisher.publish_outline_changed("other", 3);
        publisher.publish_outline_changed("ws", 15);

        match rx.recv().await.unwrap() {
            WsEvent::SlotStateChanged { slot, busy, .. } => {
                assert_eq!(slot, SlotKey::Outline);
                assert!(busy);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.recv().await.unwrap() {
            WsEvent::OutlineChanged { total_chapters, .. } => assert_eq!(total_chapters, 15),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_unregister_keeps_channel_with_live_receivers() {
        let publisher = EventPublisher::new();
        let first = publisher.register_workspace("ws");
        let _second = publisher.register_workspace("ws");

        drop(first);
        publisher.unregister_workspace("ws");
        assert!(publisher.workspace_channels.contains_key("ws"));

        drop(_second);
        publisher.unregister_workspace("ws");
        assert!(!publisher.workspace_channels.contains_key("ws"));
    }

    #[test]
    fn test_event_wire_format() {
        let event = WsEvent::SlotStateChanged {
            workspace_id: "ws".to_string(),
            slot: SlotKey::Regenerate(2),
            busy: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "SlotStateChanged");
        assert_eq!(json["data"]["slot"]["kind"], "regenerate");
        assert_eq!(json["data"]["slot"]["target"], 2);
    }
}
