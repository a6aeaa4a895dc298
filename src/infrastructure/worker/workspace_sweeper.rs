//! Workspace Sweeper - 空闲工作区回收
//!
//! 定期关闭超过空闲时限的工作区：移除状态、清理槽位、通知订阅者

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SlotRegistryPort, WorkspaceManagerPort};
use crate::application::CloseWorkspaceHandler;
use crate::infrastructure::events::EventPublisher;

const IDLE_REASON: &str = "idle_timeout";

/// Sweeper 配置
#[derive(Debug, Clone)]
pub struct WorkspaceSweeperConfig {
    /// 扫描间隔
    pub interval: Duration,
    /// 空闲超时（秒）
    pub idle_expire_secs: u64,
}

impl Default for WorkspaceSweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            idle_expire_secs: 86400,
        }
    }
}

/// 空闲工作区回收器
pub struct WorkspaceSweeper {
    config: WorkspaceSweeperConfig,
    workspace_manager: Arc<dyn WorkspaceManagerPort>,
    close_handler: CloseWorkspaceHandler,
}

impl WorkspaceSweeper {
    pub fn new(
        config: WorkspaceSweeperConfig,
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        slot_registry: Arc<dyn SlotRegistryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        let close_handler =
            CloseWorkspaceHandler::new(workspace_manager.clone(), slot_registry, event_publisher);
        Self {
            config,
            workspace_manager,
            close_handler,
        }
    }

    /// 启动 Sweeper
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            idle_expire_secs = self.config.idle_expire_secs,
            "WorkspaceSweeper started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        // 首个 tick 立即返回，跳过
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.sweep_once().await;
        }
    }

    /// 执行一次扫描，返回关闭的工作区数量
    pub async fn sweep_once(&self) -> usize {
        let expired = self
            .workspace_manager
            .get_expired(self.config.idle_expire_secs);

        let mut closed = 0;
        for workspace_id in expired {
            match self.close_handler.close(&workspace_id, IDLE_REASON).await {
                Ok(_) => closed += 1,
                // 并发关闭时可能已不存在
                Err(e) => tracing::debug!(workspace_id = %workspace_id, error = %e, "Skip expired workspace"),
            }
        }

        if closed > 0 {
            tracing::info!(closed = closed, "Idle workspaces swept");
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SlotKey;
    use crate::domain::creative::CreativeContext;
    use crate::domain::workspace::Workspace;
    use crate::infrastructure::events::WsEvent;
    use crate::infrastructure::memory::{InMemorySlotRegistry, InMemoryWorkspaceManager};

    #[tokio::test]
    async fn test_sweep_closes_idle_workspaces() {
        let manager: Arc<dyn WorkspaceManagerPort> = Arc::new(InMemoryWorkspaceManager::new());
        let registry: Arc<dyn SlotRegistryPort> = Arc::new(InMemorySlotRegistry::new());
        let publisher = Arc::new(EventPublisher::new());

        let id = manager
            .create(Workspace::new(CreativeContext::default()))
            .unwrap();
        registry.try_acquire(&id, SlotKey::Chapter).unwrap();
        let mut rx = publisher.register_workspace(&id);

        let sweeper = WorkspaceSweeper::new(
            WorkspaceSweeperConfig {
                interval: Duration::from_secs(1),
                idle_expire_secs: 0,
            },
            manager.clone(),
            registry.clone(),
            publisher,
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(sweeper.sweep_once().await, 1);
        assert!(!manager.exists(&id));
        assert!(!registry.is_busy(&id, SlotKey::Chapter));

        match rx.recv().await.unwrap() {
            WsEvent::WorkspaceClosed { reason, .. } => assert_eq!(reason, IDLE_REASON),
            other => panic!("unexpected event: {:?}", other),
        }

        assert_eq!(sweeper.sweep_once().await, 0);
    }

    #[tokio::test]
    async fn test_active_workspaces_survive() {
        let manager: Arc<dyn WorkspaceManagerPort> = Arc::new(InMemoryWorkspaceManager::new());
        let id = manager
            .create(Workspace::new(CreativeContext::default()))
            .unwrap();

        let sweeper = WorkspaceSweeper::new(
            WorkspaceSweeperConfig::default(),
            manager.clone(),
            Arc::new(InMemorySlotRegistry::new()),
            Arc::new(EventPublisher::new()),
        );

        assert_eq!(sweeper.sweep_once().await, 0);
        assert!(manager.exists(&id));
    }
}
