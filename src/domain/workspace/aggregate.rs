//! Workspace - Aggregate Root

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::WorkspaceError;
use crate::domain::asset::{AssetBoard, AssetKind};
use crate::domain::creative::CreativeContext;
use crate::domain::outline::{Outline, OutlineEntry, OutlineField};

/// 默认请求章节数
pub const DEFAULT_CHAPTER_COUNT: u32 = 15;

/// Workspace 聚合根 - 一位用户的全部创作状态（仅内存）
///
/// 不变量:
/// - selected_chapter 若存在，则指向章节正文对应的大纲下标
/// - 按下标的写操作在写入时重新校验下标
#[derive(Debug, Clone)]
pub struct Workspace {
    id: String,
    context: CreativeContext,
    chapter_count: u32,
    outline: Outline,
    assets: AssetBoard,
    selected_chapter: Option<usize>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl Workspace {
    pub fn new(context: CreativeContext) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            context,
            chapter_count: DEFAULT_CHAPTER_COUNT,
            outline: Outline::default(),
            assets: AssetBoard::default(),
            selected_chapter: None,
            created_at: now,
            last_activity: now,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), WorkspaceError> {
        if self.outline.contains(index) {
            Ok(())
        } else {
            Err(WorkspaceError::ChapterOutOfRange {
                index,
                len: self.outline.len(),
            })
        }
    }

    // ========== 设定 ==========

    pub fn update_settings(&mut self, context: CreativeContext, chapter_count: u32) {
        self.context = context;
        self.chapter_count = chapter_count;
    }

    // ========== 大纲 ==========

    /// 新生成的大纲整体替换旧大纲，并清空已选章节及其正文
    pub fn reset_outline(&mut self, entries: Vec<OutlineEntry>) {
        self.outline.replace_all(entries);
        self.selected_chapter = None;
        self.assets.set(AssetKind::Chapter, String::new());
    }

    /// 开篇大纲替换旧大纲（不触碰正文）
    pub fn replace_outline(&mut self, entries: Vec<OutlineEntry>) {
        self.outline.replace_all(entries);
    }

    pub fn append_chapters(&mut self, entries: Vec<OutlineEntry>) {
        self.outline.extend(entries);
    }

    pub fn add_chapter(&mut self) -> usize {
        self.outline.push_placeholder()
    }

    pub fn delete_chapter(&mut self, index: usize) -> Result<OutlineEntry, WorkspaceError> {
        self.check_index(index)?;
        let removed = self.outline.remove(index);

        // 已选章节跟随下标移动
        self.selected_chapter = match self.selected_chapter {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn update_chapter_field(
        &mut self,
        index: usize,
        field: OutlineField,
        value: String,
    ) -> Result<(), WorkspaceError> {
        self.check_index(index)?;
        self.outline.update_field(index, field, value);
        Ok(())
    }

    pub fn replace_chapter(
        &mut self,
        index: usize,
        entry: OutlineEntry,
    ) -> Result<OutlineEntry, WorkspaceError> {
        self.check_index(index)?;
        Ok(self.outline.replace(index, entry))
    }

    /// 校验 index 处仍是发起请求时的章节
    pub fn expect_chapter(
        &self,
        index: usize,
        expected: &OutlineEntry,
    ) -> Result<(), WorkspaceError> {
        if self.chapter(index)? == expected {
            Ok(())
        } else {
            Err(WorkspaceError::ChapterChanged { index })
        }
    }

    pub fn chapter(&self, index: usize) -> Result<&OutlineEntry, WorkspaceError> {
        self.check_index(index)?;
        Ok(&self.outline.entries()[index])
    }

    // ========== 生成内容 ==========

    pub fn set_asset(&mut self, kind: AssetKind, text: String) {
        self.assets.set(kind, text);
    }

    /// 写入章节正文并记录其对应的大纲下标
    pub fn set_chapter_body(&mut self, index: usize, text: String) -> Result<(), WorkspaceError> {
        self.check_index(index)?;
        self.selected_chapter = Some(index);
        self.assets.set(AssetKind::Chapter, text);
        Ok(())
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    // Getters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn context(&self) -> &CreativeContext {
        &self.context
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn assets(&self) -> &AssetBoard {
        &self.assets
    }

    pub fn selected_chapter(&self) -> Option<usize> {
        self.selected_chapter
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }
}
