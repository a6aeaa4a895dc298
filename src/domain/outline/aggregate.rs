//! Outline Context - 大纲序列与编辑操作

use serde::{Deserialize, Serialize};

use super::{OutlineEntry, OutlineField};

/// 新插入章节的默认节拍
pub const PLACEHOLDER_BEAT: &str = "新的节拍";

/// 章节大纲
///
/// 不变量:
/// - 顺序有意义，所有编辑操作保持其余条目的相对顺序
/// - 标题不要求唯一
///
/// 按下标的操作对越界下标 panic：越界属于调用方的编程错误，
/// 面向用户的入口需先用 [`Outline::contains`] 校验。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    entries: Vec<OutlineEntry>,
}

impl Outline {
    pub fn new(entries: Vec<OutlineEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[OutlineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OutlineEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&OutlineEntry> {
        self.entries.last()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.entries.len()
    }

    /// 末尾追加占位章节，返回新章节下标
    pub fn push_placeholder(&mut self) -> usize {
        let index = self.entries.len();
        self.entries.push(OutlineEntry::new(
            format!("新章节 {}", index + 1),
            PLACEHOLDER_BEAT,
        ));
        index
    }

    /// 删除指定章节，其后条目整体前移一位
    ///
    /// # Panics
    /// 下标越界时 panic
    pub fn remove(&mut self, index: usize) -> OutlineEntry {
        self.entries.remove(index)
    }

    /// 更新单个字段
    ///
    /// # Panics
    /// 下标越界时 panic
    pub fn update_field(&mut self, index: usize, field: OutlineField, value: String) {
        let entry = &mut self.entries[index];
        match field {
            OutlineField::Title => entry.title = value,
            OutlineField::Beat => entry.beat = value,
        }
    }

    /// 整体替换指定章节（重新生成结果）
    ///
    /// # Panics
    /// 下标越界时 panic
    pub fn replace(&mut self, index: usize, entry: OutlineEntry) -> OutlineEntry {
        std::mem::replace(&mut self.entries[index], entry)
    }

    /// 末尾追加多个章节
    pub fn extend(&mut self, entries: Vec<OutlineEntry>) {
        self.entries.extend(entries);
    }

    /// 替换整个大纲
    pub fn replace_all(&mut self, entries: Vec<OutlineEntry>) {
        self.entries = entries;
    }
}

impl From<Vec<OutlineEntry>> for Outline {
    fn from(entries: Vec<OutlineEntry>) -> Self {
        Self::new(entries)
    }
}
