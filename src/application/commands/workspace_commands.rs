//! Workspace Commands - 工作区相关命令

use crate::domain::asset::AssetKind;
use crate::domain::creative::CreativeContext;

/// 创建工作区
#[derive(Debug, Clone)]
pub struct CreateWorkspace {
    pub context: CreativeContext,
    /// None 使用默认章节数
    pub chapter_count: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CreateWorkspaceResponse {
    pub workspace_id: String,
}

/// 更新创作参数
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub workspace_id: String,
    pub context: CreativeContext,
    pub chapter_count: u32,
}

/// 关闭工作区
#[derive(Debug, Clone)]
pub struct CloseWorkspace {
    pub workspace_id: String,
}

#[derive(Debug, Clone)]
pub struct CloseWorkspaceResponse {
    pub workspace_id: String,
    /// 关闭时被清理的在途槽位数
    pub cleared_slots: usize,
}

/// 手动编辑生成内容（整体覆盖）
#[derive(Debug, Clone)]
pub struct UpdateAsset {
    pub workspace_id: String,
    pub kind: AssetKind,
    pub text: String,
}
