//! Outline Command Handlers - 大纲手动编辑

use std::sync::Arc;

use crate::application::commands::outline_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::WorkspaceManagerPort;
use crate::domain::workspace::Workspace;
use crate::infrastructure::events::EventPublisher;

/// 修改后读取完整大纲并推送变更
fn outline_response(
    workspace_manager: &dyn WorkspaceManagerPort,
    event_publisher: &EventPublisher,
    workspace_id: &str,
) -> Result<OutlineResponse, ApplicationError> {
    let outline = workspace_manager.get(workspace_id)?.outline().clone();
    event_publisher.publish_outline_changed(workspace_id, outline.len());
    Ok(OutlineResponse {
        workspace_id: workspace_id.to_string(),
        outline,
    })
}

/// Add Chapter Handler
pub struct AddChapterHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    event_publisher: Arc<EventPublisher>,
}

impl AddChapterHandler {
    pub fn new(
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            workspace_manager,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: AddChapter) -> Result<OutlineResponse, ApplicationError> {
        self.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(|ws: &mut Workspace| {
                ws.add_chapter();
                Ok(())
            }),
        )?;
        outline_response(
            self.workspace_manager.as_ref(),
            &self.event_publisher,
            &cmd.workspace_id,
        )
    }
}

/// Delete Chapter Handler
pub struct DeleteChapterHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    event_publisher: Arc<EventPublisher>,
}

impl DeleteChapterHandler {
    pub fn new(
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            workspace_manager,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: DeleteChapter) -> Result<OutlineResponse, ApplicationError> {
        let index = cmd.index;
        self.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| ws.delete_chapter(index).map(|_| ())),
        )?;

        tracing::debug!(workspace_id = %cmd.workspace_id, index = index, "Chapter deleted");
        outline_response(
            self.workspace_manager.as_ref(),
            &self.event_publisher,
            &cmd.workspace_id,
        )
    }
}

/// Update Chapter Field Handler
pub struct UpdateChapterFieldHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    event_publisher: Arc<EventPublisher>,
}

impl UpdateChapterFieldHandler {
    pub fn new(
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            workspace_manager,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateChapterField,
    ) -> Result<OutlineResponse, ApplicationError> {
        let UpdateChapterField {
            workspace_id,
            index,
            field,
            value,
        } = cmd;

        self.workspace_manager.update(
            &workspace_id,
            Box::new(move |ws: &mut Workspace| ws.update_chapter_field(index, field, value)),
        )?;
        outline_response(
            self.workspace_manager.as_ref(),
            &self.event_publisher,
            &workspace_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creative::CreativeContext;
    use crate::domain::outline::{OutlineEntry, OutlineField, PLACEHOLDER_BEAT};
    use crate::infrastructure::memory::InMemoryWorkspaceManager;

    fn setup(entries: usize) -> (Arc<dyn WorkspaceManagerPort>, Arc<EventPublisher>, String) {
        let manager: Arc<dyn WorkspaceManagerPort> = Arc::new(InMemoryWorkspaceManager::new());
        let mut workspace = Workspace::new(CreativeContext::default());
        workspace.append_chapters(
            (1..=entries)
                .map(|i| OutlineEntry::new(format!("第{}章", i), format!("节拍{}", i)))
                .collect(),
        );
        let id = manager.create(workspace).unwrap();
        (manager, Arc::new(EventPublisher::new()), id)
    }

    #[tokio::test]
    async fn test_add_chapter_appends_placeholder() {
        let (manager, publisher, id) = setup(2);
        let handler = AddChapterHandler::new(manager, publisher);

        let resp = handler
            .handle(AddChapter { workspace_id: id })
            .await
            .unwrap();

        assert_eq!(resp.outline.len(), 3);
        let last = resp.outline.last().unwrap();
        assert_eq!(last.title, "新章节 3");
        assert_eq!(last.beat, PLACEHOLDER_BEAT);
    }

    #[tokio::test]
    async fn test_delete_shifts_later_entries() {
        let (manager, publisher, id) = setup(3);
        let handler = DeleteChapterHandler::new(manager, publisher);

        let resp = handler
            .handle(DeleteChapter {
                workspace_id: id,
                index: 0,
            })
            .await
            .unwrap();

        let titles: Vec<_> = resp.outline.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["第2章", "第3章"]);
    }

    #[tokio::test]
    async fn test_out_of_range_is_validation_error() {
        let (manager, publisher, id) = setup(1);
        let delete = DeleteChapterHandler::new(manager.clone(), publisher.clone());
        let update = UpdateChapterFieldHandler::new(manager.clone(), publisher);

        let result = delete
            .handle(DeleteChapter {
                workspace_id: id.clone(),
                index: 5,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));

        let result = update
            .handle(UpdateChapterField {
                workspace_id: id.clone(),
                index: 1,
                field: OutlineField::Title,
                value: "x".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(manager.get(&id).unwrap().outline().len(), 1);
    }

    #[tokio::test]
    async fn test_update_field_changes_only_target() {
        let (manager, publisher, id) = setup(2);
        let handler = UpdateChapterFieldHandler::new(manager, publisher);

        let resp = handler
            .handle(UpdateChapterField {
                workspace_id: id,
                index: 1,
                field: OutlineField::Beat,
                value: "主角觉醒".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.outline.get(0).unwrap().beat, "节拍1");
        assert_eq!(resp.outline.get(1).unwrap().beat, "主角觉醒");
        assert_eq!(resp.outline.get(1).unwrap().title, "第2章");
    }
}
