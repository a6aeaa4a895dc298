//! Generation Commands - 生成命令
//!
//! 每个命令占用一个槽位；成功后才写回工作区

use crate::domain::asset::AssetKind;
use crate::domain::outline::OutlineEntry;

/// 生成大纲（整体替换）
#[derive(Debug, Clone)]
pub struct GenerateOutline {
    pub workspace_id: String,
}

/// 续写章节（追加）
#[derive(Debug, Clone)]
pub struct GenerateMoreChapters {
    pub workspace_id: String,
}

/// 黄金三章开篇大纲（整体替换）
#[derive(Debug, Clone)]
pub struct GenerateOpeningOutline {
    pub workspace_id: String,
}

/// 重新生成第 index 章
#[derive(Debug, Clone)]
pub struct RegenerateChapter {
    pub workspace_id: String,
    pub index: usize,
}

/// 为第 index 章建议节拍
#[derive(Debug, Clone)]
pub struct SuggestBeat {
    pub workspace_id: String,
    pub index: usize,
}

/// 单章变更结果
#[derive(Debug, Clone)]
pub struct ChapterResponse {
    pub workspace_id: String,
    pub index: usize,
    pub chapter: OutlineEntry,
}

/// 生成辅助设定
#[derive(Debug, Clone)]
pub struct GenerateAsset {
    pub workspace_id: String,
    pub kind: AssetKind,
}

#[derive(Debug, Clone)]
pub struct AssetResponse {
    pub workspace_id: String,
    pub kind: AssetKind,
    pub text: String,
}

/// 撰写第 index 章正文
#[derive(Debug, Clone)]
pub struct WriteChapter {
    pub workspace_id: String,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct WriteChapterResponse {
    pub workspace_id: String,
    pub index: usize,
    pub content: String,
}
