//! In-Memory Workspace Manager Implementation

use chrono::Utc;
use dashmap::DashMap;

use crate::application::ports::{WorkspaceManagerPort, WorkspaceUpdate, MAX_IDLE_TIMEOUT_SECS};
use crate::domain::workspace::{Workspace, WorkspaceError};

/// 内存工作区管理器
pub struct InMemoryWorkspaceManager {
    workspaces: DashMap<String, Workspace>,
}

impl InMemoryWorkspaceManager {
    pub fn new() -> Self {
        Self {
            workspaces: DashMap::new(),
        }
    }
}

impl Default for InMemoryWorkspaceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceManagerPort for InMemoryWorkspaceManager {
    fn create(&self, workspace: Workspace) -> Result<String, WorkspaceError> {
        let workspace_id = workspace.id().to_string();
        if self.workspaces.contains_key(&workspace_id) {
            return Err(WorkspaceError::AlreadyExists(workspace_id));
        }
        self.workspaces.insert(workspace_id.clone(), workspace);
        tracing::info!(workspace_id = %workspace_id, "Workspace created");
        Ok(workspace_id)
    }

    fn get(&self, id: &str) -> Result<Workspace, WorkspaceError> {
        self.workspaces
            .get(id)
            .map(|w| w.clone())
            .ok_or_else(|| WorkspaceError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, update: WorkspaceUpdate<'_>) -> Result<(), WorkspaceError> {
        let mut workspace = self
            .workspaces
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::NotFound(id.to_string()))?;
        update(&mut *workspace)?;
        workspace.touch();
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.workspaces.contains_key(id)
    }

    fn close(&self, id: &str) -> Result<(), WorkspaceError> {
        self.workspaces
            .remove(id)
            .map(|_| {
                tracing::info!(workspace_id = %id, "Workspace closed");
            })
            .ok_or_else(|| WorkspaceError::NotFound(id.to_string()))
    }

    fn touch(&self, id: &str) {
        if let Some(mut workspace) = self.workspaces.get_mut(id) {
            workspace.touch();
        }
    }

    fn get_expired(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs.min(MAX_IDLE_TIMEOUT_SECS) as i64);

        self.workspaces
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity();
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }

    fn list_all(&self) -> Vec<String> {
        self.workspaces.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creative::CreativeContext;
    use crate::domain::outline::OutlineEntry;

    #[test]
    fn test_get_expired_with_huge_timeout() {
        let manager = InMemoryWorkspaceManager::new();
        manager.create(Workspace::new(CreativeContext::default())).unwrap();

        assert!(manager.get_expired(u64::MAX).is_empty());
        assert!(manager.get_expired(MAX_IDLE_TIMEOUT_SECS).is_empty());
    }

    #[test]
    fn test_workspace_lifecycle() {
        let manager = InMemoryWorkspaceManager::new();
        let workspace = Workspace::new(CreativeContext::default());
        let workspace_id = workspace.id().to_string();

        // Create
        assert!(manager.create(workspace).is_ok());
        assert!(manager.exists(&workspace_id));

        // Update
        manager
            .update(
                &workspace_id,
                Box::new(|ws: &mut Workspace| {
                    ws.append_chapters(vec![OutlineEntry::new("a", "b")]);
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(manager.get(&workspace_id).unwrap().outline().len(), 1);

        // List
        assert_eq!(manager.list_all(), vec![workspace_id.clone()]);

        // Close
        assert!(manager.close(&workspace_id).is_ok());
        assert!(!manager.exists(&workspace_id));
        assert!(matches!(
            manager.get(&workspace_id),
            Err(WorkspaceError::NotFound(_))
        ));
    }

    #[test]
    fn test_failed_update_leaves_state_unchanged() {
        let manager = InMemoryWorkspaceManager::new();
        let id = manager
            .create(Workspace::new(CreativeContext::default()))
            .unwrap();

        let result = manager.update(&id, Box::new(|ws: &mut Workspace| ws.delete_chapter(0).map(|_| ())));

        assert!(matches!(
            result,
            Err(WorkspaceError::ChapterOutOfRange { index: 0, len: 0 })
        ));
        assert!(manager.get(&id).unwrap().outline().is_empty());
    }

    #[test]
    fn test_update_unknown_workspace() {
        let manager = InMemoryWorkspaceManager::new();
        let result = manager.update("missing", Box::new(|_: &mut Workspace| Ok(())));
        assert!(matches!(result, Err(WorkspaceError::NotFound(_))));
    }

    #[test]
    fn test_expired_detection() {
        let manager = InMemoryWorkspaceManager::new();
        let id = manager
            .create(Workspace::new(CreativeContext::default()))
            .unwrap();

        assert!(manager.get_expired(3600).is_empty());

        std::thread::sleep(std::time::Duration::from_millis(10));
        assert_eq!(manager.get_expired(0), vec![id]);
    }
}
