//! Outline Context - Entities

use serde::{Deserialize, Serialize};

/// 单章规划单元
///
/// 不变量:
/// - title 与 beat 始终存在（允许为空字符串）
/// - 序号由所在序列位置隐含
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// 章节标题
    pub title: String,
    /// 故事节拍（本章在整体结构中的作用）
    pub beat: String,
}

impl OutlineEntry {
    pub fn new(title: impl Into<String>, beat: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            beat: beat.into(),
        }
    }
}

/// 可编辑字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineField {
    Title,
    Beat,
}
