//! Workspace Command Handlers

use std::sync::Arc;

use crate::application::commands::workspace_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{SlotRegistryPort, WorkspaceManagerPort};
use crate::domain::creative::CreativeError;
use crate::domain::workspace::{Workspace, DEFAULT_CHAPTER_COUNT};
use crate::infrastructure::events::EventPublisher;

fn validate_chapter_count(chapter_count: u32, max: u32) -> Result<u32, ApplicationError> {
    if chapter_count == 0 || chapter_count > max {
        return Err(CreativeError::InvalidChapterCount(chapter_count).into());
    }
    Ok(chapter_count)
}

/// Create Workspace Handler
pub struct CreateWorkspaceHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    max_chapter_count: u32,
}

impl CreateWorkspaceHandler {
    pub fn new(workspace_manager: Arc<dyn WorkspaceManagerPort>, max_chapter_count: u32) -> Self {
        Self {
            workspace_manager,
            max_chapter_count,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateWorkspace,
    ) -> Result<CreateWorkspaceResponse, ApplicationError> {
        let chapter_count = validate_chapter_count(
            cmd.chapter_count.unwrap_or(DEFAULT_CHAPTER_COUNT),
            self.max_chapter_count,
        )?;

        let mut workspace = Workspace::new(cmd.context.clone());
        workspace.update_settings(cmd.context, chapter_count);

        let workspace_id = self.workspace_manager.create(workspace)?;

        tracing::info!(
            workspace_id = %workspace_id,
            chapter_count = chapter_count,
            "Workspace created"
        );

        Ok(CreateWorkspaceResponse { workspace_id })
    }
}

/// Update Settings Handler - 替换创作参数
pub struct UpdateSettingsHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    max_chapter_count: u32,
}

impl UpdateSettingsHandler {
    pub fn new(workspace_manager: Arc<dyn WorkspaceManagerPort>, max_chapter_count: u32) -> Self {
        Self {
            workspace_manager,
            max_chapter_count,
        }
    }

    pub async fn handle(&self, cmd: UpdateSettings) -> Result<(), ApplicationError> {
        let chapter_count = validate_chapter_count(cmd.chapter_count, self.max_chapter_count)?;
        let context = cmd.context;

        self.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.update_settings(context, chapter_count);
                Ok(())
            }),
        )?;

        tracing::debug!(workspace_id = %cmd.workspace_id, "Workspace settings updated");
        Ok(())
    }
}

/// Close Workspace Handler
pub struct CloseWorkspaceHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    slot_registry: Arc<dyn SlotRegistryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl CloseWorkspaceHandler {
    pub fn new(
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        slot_registry: Arc<dyn SlotRegistryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            workspace_manager,
            slot_registry,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CloseWorkspace,
    ) -> Result<CloseWorkspaceResponse, ApplicationError> {
        self.close(&cmd.workspace_id, "closed").await
    }

    /// 关闭工作区：移除状态、清理槽位、通知订阅者
    pub async fn close(
        &self,
        workspace_id: &str,
        reason: &str,
    ) -> Result<CloseWorkspaceResponse, ApplicationError> {
        self.workspace_manager.close(workspace_id)?;
        let cleared_slots = self.slot_registry.clear_workspace(workspace_id);

        self.event_publisher
            .publish_workspace_closed(workspace_id, reason);
        self.event_publisher.remove_workspace(workspace_id);

        tracing::info!(
            workspace_id = %workspace_id,
            reason = %reason,
            cleared_slots = cleared_slots,
            "Workspace closed"
        );

        Ok(CloseWorkspaceResponse {
            workspace_id: workspace_id.to_string(),
            cleared_slots,
        })
    }
}

/// Update Asset Handler - 手动编辑生成内容
pub struct UpdateAssetHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    event_publisher: Arc<EventPublisher>,
}

impl UpdateAssetHandler {
    pub fn new(
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            workspace_manager,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: UpdateAsset) -> Result<(), ApplicationError> {
        let kind = cmd.kind;
        let text = cmd.text;

        self.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.set_asset(kind, text);
                Ok(())
            }),
        )?;

        self.event_publisher
            .publish_asset_changed(&cmd.workspace_id, kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SlotKey;
    use crate::domain::asset::AssetKind;
    use crate::domain::creative::CreativeContext;
    use crate::infrastructure::memory::{InMemorySlotRegistry, InMemoryWorkspaceManager};

    fn manager() -> Arc<dyn WorkspaceManagerPort> {
        Arc::new(InMemoryWorkspaceManager::new())
    }

    #[tokio::test]
    async fn test_create_uses_default_chapter_count() {
        let manager = manager();
        let handler = CreateWorkspaceHandler::new(manager.clone(), 100);

        let resp = handler
            .handle(CreateWorkspace {
                context: CreativeContext::default().with_title("星辰之战"),
                chapter_count: None,
            })
            .await
            .unwrap();

        let workspace = manager.get(&resp.workspace_id).unwrap();
        assert_eq!(workspace.chapter_count(), DEFAULT_CHAPTER_COUNT);
        assert_eq!(workspace.context().title, "星辰之战");
    }

    #[tokio::test]
    async fn test_chapter_count_bounds() {
        let manager = manager();
        let create = CreateWorkspaceHandler::new(manager.clone(), 50);

        for bad in [0, 51] {
            let result = create
                .handle(CreateWorkspace {
                    context: CreativeContext::default(),
                    chapter_count: Some(bad),
                })
                .await;
            assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        }

        let id = create
            .handle(CreateWorkspace {
                context: CreativeContext::default(),
                chapter_count: Some(50),
            })
            .await
            .unwrap()
            .workspace_id;

        let update = UpdateSettingsHandler::new(manager.clone(), 50);
        let result = update
            .handle(UpdateSettings {
                workspace_id: id.clone(),
                context: CreativeContext::default().with_title("新标题"),
                chapter_count: 0,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(manager.get(&id).unwrap().context().title, "");

        update
            .handle(UpdateSettings {
                workspace_id: id.clone(),
                context: CreativeContext::default().with_title("新标题"),
                chapter_count: 20,
            })
            .await
            .unwrap();
        let workspace = manager.get(&id).unwrap();
        assert_eq!(workspace.context().title, "新标题");
        assert_eq!(workspace.chapter_count(), 20);
    }

    #[tokio::test]
    async fn test_close_clears_slots_and_notifies() {
        let manager = manager();
        let registry: Arc<dyn SlotRegistryPort> = Arc::new(InMemorySlotRegistry::new());
        let publisher = Arc::new(EventPublisher::new());

        let id = manager
            .create(Workspace::new(CreativeContext::default()))
            .unwrap();
        registry.try_acquire(&id, SlotKey::Outline).unwrap();
        let mut rx = publisher.register_workspace(&id);

        let handler = CloseWorkspaceHandler::new(manager.clone(), registry.clone(), publisher);
        let resp = handler
            .handle(CloseWorkspace {
                workspace_id: id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(resp.cleared_slots, 1);
        assert!(!manager.exists(&id));
        assert!(registry.busy_slots(&id).is_empty());
        assert!(matches!(
            rx.recv().await.unwrap(),
            crate::infrastructure::events::WsEvent::WorkspaceClosed { .. }
        ));

        let again = handler
            .handle(CloseWorkspace { workspace_id: id })
            .await;
        assert!(matches!(again, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_asset_overwrites() {
        let manager = manager();
        let id = manager
            .create(Workspace::new(CreativeContext::default()))
            .unwrap();
        let handler = UpdateAssetHandler::new(manager.clone(), Arc::new(EventPublisher::new()));

        handler
            .handle(UpdateAsset {
                workspace_id: id.clone(),
                kind: AssetKind::GoldenFinger,
                text: "吞噬系统".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            manager.get(&id).unwrap().assets().get(AssetKind::GoldenFinger),
            "吞噬系统"
        );
    }
}
