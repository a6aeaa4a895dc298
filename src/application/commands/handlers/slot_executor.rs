//! Slot Executor - 生成请求的槽位占用与事件推送

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::generation_client::GenerationFailed;
use crate::application::ports::{SlotGuard, SlotKey, SlotRegistryPort};
use crate::domain::workspace::Workspace;
use crate::infrastructure::events::EventPublisher;

/// 为生成命令占用槽位
pub struct SlotExecutor {
    slot_registry: Arc<dyn SlotRegistryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl SlotExecutor {
    pub fn new(
        slot_registry: Arc<dyn SlotRegistryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            slot_registry,
            event_publisher,
        }
    }

    /// 占用槽位并推送忙碌事件；槽位已忙时返回 SlotBusy
    pub fn begin(&self, workspace_id: &str, slot: SlotKey) -> Result<BusySlot, ApplicationError> {
        let guard = SlotGuard::acquire(self.slot_registry.clone(), workspace_id, slot)?;
        self.event_publisher.publish_slot_state(workspace_id, slot, true);
        Ok(BusySlot {
            guard: Some(guard),
            event_publisher: self.event_publisher.clone(),
        })
    }
}

/// 在途生成请求
///
/// Drop 时释放槽位并推送空闲事件
pub struct BusySlot {
    guard: Option<SlotGuard>,
    event_publisher: Arc<EventPublisher>,
}

impl BusySlot {
    /// 推送失败事件并转换为应用层错误
    pub fn fail(&self, error: GenerationFailed) -> ApplicationError {
        if let Some(guard) = &self.guard {
            tracing::warn!(
                workspace_id = %guard.workspace_id(),
                slot = %guard.slot(),
                operation = error.operation,
                "Generation failed, workspace left unchanged"
            );
            self.event_publisher.publish_generation_failed(
                guard.workspace_id(),
                guard.slot(),
                &error.to_string(),
            );
        }
        error.into()
    }
}

impl Drop for BusySlot {
    fn drop(&mut self) {
        if let Some(guard) = self.guard.take() {
            let workspace_id = guard.workspace_id().to_string();
            let slot = guard.slot();
            drop(guard);
            self.event_publisher
                .publish_slot_state(&workspace_id, slot, false);
        }
    }
}

/// 生成前置条件：标题已填写
pub(crate) fn require_title(workspace: &Workspace) -> Result<(), ApplicationError> {
    if workspace.context().has_title() {
        Ok(())
    } else {
        Err(crate::domain::creative::CreativeError::MissingTitle.into())
    }
}
