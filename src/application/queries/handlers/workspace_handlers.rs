//! Workspace Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SlotKey, SlotRegistryPort, WorkspaceManagerPort};
use crate::application::queries::{GetWorkspace, ListWorkspaces, PreviewContext};
use crate::domain::asset::AssetBoard;
use crate::domain::creative::{build_chapter_context, build_context, CreativeContext};
use crate::domain::outline::Outline;
use crate::domain::workspace::Workspace;

// ============================================================================
// Response DTOs
// ============================================================================

/// 工作区完整状态
#[derive(Debug, Clone)]
pub struct WorkspaceResponse {
    pub workspace_id: String,
    pub context: CreativeContext,
    pub chapter_count: u32,
    pub outline: Outline,
    pub assets: AssetBoard,
    pub selected_chapter: Option<usize>,
    /// 当前有在途请求的槽位
    pub busy_slots: Vec<SlotKey>,
    pub created_at: String,
    pub last_activity: String,
}

impl WorkspaceResponse {
    fn new(workspace: Workspace, mut busy_slots: Vec<SlotKey>) -> Self {
        busy_slots.sort_by_key(|s| s.to_string());
        Self {
            workspace_id: workspace.id().to_string(),
            context: workspace.context().clone(),
            chapter_count: workspace.chapter_count(),
            outline: workspace.outline().clone(),
            assets: workspace.assets().clone(),
            selected_chapter: workspace.selected_chapter(),
            busy_slots,
            created_at: workspace.created_at().to_rfc3339(),
            last_activity: workspace.last_activity().to_rfc3339(),
        }
    }
}

/// 工作区摘要
#[derive(Debug, Clone)]
pub struct WorkspaceSummary {
    pub workspace_id: String,
    pub title: String,
    pub total_chapters: usize,
    pub last_activity: String,
}

/// 上下文预览
#[derive(Debug, Clone)]
pub struct ContextPreviewResponse {
    pub workspace_id: String,
    /// 核心设定文本块（大纲与设定生成使用）
    pub context: String,
    /// 章节写作使用的完整上下文
    pub chapter_context: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetWorkspace Handler
pub struct GetWorkspaceHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    slot_registry: Arc<dyn SlotRegistryPort>,
}

impl GetWorkspaceHandler {
    pub fn new(
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        slot_registry: Arc<dyn SlotRegistryPort>,
    ) -> Self {
        Self {
            workspace_manager,
            slot_registry,
        }
    }

    pub async fn handle(&self, query: GetWorkspace) -> Result<WorkspaceResponse, ApplicationError> {
        let workspace = self.workspace_manager.get(&query.workspace_id)?;
        self.workspace_manager.touch(&query.workspace_id);
        let busy_slots = self.slot_registry.busy_slots(&query.workspace_id);
        Ok(WorkspaceResponse::new(workspace, busy_slots))
    }
}

/// ListWorkspaces Handler
pub struct ListWorkspacesHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
}

impl ListWorkspacesHandler {
    pub fn new(workspace_manager: Arc<dyn WorkspaceManagerPort>) -> Self {
        Self { workspace_manager }
    }

    /// 按最后活动时间倒序
    pub async fn handle(
        &self,
        _query: ListWorkspaces,
    ) -> Result<Vec<WorkspaceSummary>, ApplicationError> {
        let mut workspaces: Vec<Workspace> = self
            .workspace_manager
            .list_all()
            .iter()
            .filter_map(|id| self.workspace_manager.get(id).ok())
            .collect();
        workspaces.sort_by_key(|w| std::cmp::Reverse(w.last_activity()));

        Ok(workspaces
            .into_iter()
            .map(|w| WorkspaceSummary {
                workspace_id: w.id().to_string(),
                title: w.context().title.clone(),
                total_chapters: w.outline().len(),
                last_activity: w.last_activity().to_rfc3339(),
            })
            .collect())
    }
}

/// PreviewContext Handler
pub struct PreviewContextHandler {
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
}

impl PreviewContextHandler {
    pub fn new(workspace_manager: Arc<dyn WorkspaceManagerPort>) -> Self {
        Self { workspace_manager }
    }

    pub async fn handle(
        &self,
        query: PreviewContext,
    ) -> Result<ContextPreviewResponse, ApplicationError> {
        let workspace = self.workspace_manager.get(&query.workspace_id)?;

        Ok(ContextPreviewResponse {
            workspace_id: query.workspace_id,
            context: build_context(workspace.context()),
            chapter_context: build_chapter_context(
                workspace.context(),
                workspace.assets(),
                workspace.outline(),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outline::OutlineEntry;
    use crate::infrastructure::memory::{InMemorySlotRegistry, InMemoryWorkspaceManager};

    #[tokio::test]
    async fn test_get_workspace_reports_busy_slots() {
        let manager: Arc<dyn WorkspaceManagerPort> = Arc::new(InMemoryWorkspaceManager::new());
        let registry: Arc<dyn SlotRegistryPort> = Arc::new(InMemorySlotRegistry::new());
        let id = manager
            .create(Workspace::new(CreativeContext::default().with_title("星辰之战")))
            .unwrap();
        registry.try_acquire(&id, SlotKey::Regenerate(2)).unwrap();

        let handler = GetWorkspaceHandler::new(manager, registry);
        let resp = handler
            .handle(GetWorkspace {
                workspace_id: id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(resp.workspace_id, id);
        assert_eq!(resp.context.title, "星辰之战");
        assert_eq!(resp.busy_slots, vec![SlotKey::Regenerate(2)]);

        let missing = handler
            .handle(GetWorkspace {
                workspace_id: "missing".to_string(),
            })
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_workspaces() {
        let manager: Arc<dyn WorkspaceManagerPort> = Arc::new(InMemoryWorkspaceManager::new());
        let mut workspace = Workspace::new(CreativeContext::default().with_title("甲"));
        workspace.append_chapters(vec![OutlineEntry::new("a", "b")]);
        manager.create(workspace).unwrap();
        manager
            .create(Workspace::new(CreativeContext::default().with_title("乙")))
            .unwrap();

        let list = ListWorkspacesHandler::new(manager)
            .handle(ListWorkspaces)
            .await
            .unwrap();

        assert_eq!(list.len(), 2);
        let first = list.iter().find(|w| w.title == "甲").unwrap();
        assert_eq!(first.total_chapters, 1);
    }

    #[tokio::test]
    async fn test_preview_context() {
        let manager: Arc<dyn WorkspaceManagerPort> = Arc::new(InMemoryWorkspaceManager::new());
        let mut workspace = Workspace::new(CreativeContext::default().with_title("星辰之战"));
        workspace.append_chapters(vec![OutlineEntry::new("启程", "离开故乡")]);
        let id = manager.create(workspace).unwrap();

        let resp = PreviewContextHandler::new(manager)
            .handle(PreviewContext { workspace_id: id })
            .await
            .unwrap();

        assert!(resp.context.contains("星辰之战"));
        assert!(!resp.context.contains("启程"));
        assert!(resp.chapter_context.contains("Chapter 1: 启程 (Beat: 离开故乡)"));
    }
}
