//! Workspace Manager Port - 工作区生命周期管理
//!
//! 定义工作区存取的抽象接口，具体实现在 infrastructure/memory 层

use crate::domain::workspace::{Workspace, WorkspaceError};

/// 空闲超时上限（约 100 年），超出后按此值处理
pub const MAX_IDLE_TIMEOUT_SECS: u64 = 100 * 365 * 86_400;

/// 对单个工作区的原子修改
pub type WorkspaceUpdate<'a> = Box<dyn FnOnce(&mut Workspace) -> Result<(), WorkspaceError> + Send + 'a>;

/// Workspace Manager Port
///
/// 所有状态存储在内存中；update 在持有该工作区锁期间执行修改
pub trait WorkspaceManagerPort: Send + Sync {
    /// 创建工作区，返回 ID
    fn create(&self, workspace: Workspace) -> Result<String, WorkspaceError>;

    /// 获取工作区快照
    fn get(&self, id: &str) -> Result<Workspace, WorkspaceError>;

    /// 原子修改工作区；修改失败时由闭包保证未改动任何状态
    fn update(&self, id: &str, update: WorkspaceUpdate<'_>) -> Result<(), WorkspaceError>;

    /// 检查工作区是否存在
    fn exists(&self, id: &str) -> bool;

    /// 关闭工作区
    fn close(&self, id: &str) -> Result<(), WorkspaceError>;

    /// 更新最后活动时间
    fn touch(&self, id: &str);

    /// 获取所有空闲超时的工作区 ID
    fn get_expired(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 获取所有工作区 ID
    fn list_all(&self) -> Vec<String>;
}
