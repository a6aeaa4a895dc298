//! Workspace Queries

/// 获取工作区完整状态
#[derive(Debug, Clone)]
pub struct GetWorkspace {
    pub workspace_id: String,
}

/// 列出所有工作区
#[derive(Debug, Clone)]
pub struct ListWorkspaces;

/// 预览组装后的上下文文本
#[derive(Debug, Clone)]
pub struct PreviewContext {
    pub workspace_id: String,
}
