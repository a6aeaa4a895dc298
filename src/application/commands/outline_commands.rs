//! Outline Commands - 大纲手动编辑命令

use crate::domain::outline::{Outline, OutlineField};

/// 末尾追加占位章节
#[derive(Debug, Clone)]
pub struct AddChapter {
    pub workspace_id: String,
}

/// 删除第 index 章
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub workspace_id: String,
    pub index: usize,
}

/// 修改第 index 章的标题或节拍
#[derive(Debug, Clone)]
pub struct UpdateChapterField {
    pub workspace_id: String,
    pub index: usize,
    pub field: OutlineField,
    pub value: String,
}

/// 大纲变更后的完整大纲
#[derive(Debug, Clone)]
pub struct OutlineResponse {
    pub workspace_id: String,
    pub outline: Outline,
}
