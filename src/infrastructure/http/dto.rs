//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{
    AssetResponse, ChapterResponse, ContextPreviewResponse, OptionItem, OptionsResponse,
    OutlineResponse, SlotKey, WorkspaceResponse, WorkspaceSummary, WriteChapterResponse,
};
use crate::domain::asset::{AssetBoard, AssetKind};
use crate::domain::creative::CreativeContext;
use crate::domain::outline::OutlineEntry;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// 通用请求
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WorkspaceIdRequest {
    pub workspace_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterIndexRequest {
    pub workspace_id: String,
    pub index: usize,
}

// ============================================================================
// Workspace DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct WorkspaceDto {
    pub workspace_id: String,
    pub context: CreativeContext,
    pub chapter_count: u32,
    pub outline: Vec<OutlineEntry>,
    pub assets: AssetBoard,
    pub selected_chapter: Option<usize>,
    pub busy_slots: Vec<SlotKey>,
    pub created_at: String,
    pub last_activity: String,
}

impl From<WorkspaceResponse> for WorkspaceDto {
    fn from(resp: WorkspaceResponse) -> Self {
        Self {
            workspace_id: resp.workspace_id,
            context: resp.context,
            chapter_count: resp.chapter_count,
            outline: resp.outline.entries().to_vec(),
            assets: resp.assets,
            selected_chapter: resp.selected_chapter,
            busy_slots: resp.busy_slots,
            created_at: resp.created_at,
            last_activity: resp.last_activity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkspaceSummaryDto {
    pub workspace_id: String,
    pub title: String,
    pub total_chapters: usize,
    pub last_activity: String,
}

impl From<WorkspaceSummary> for WorkspaceSummaryDto {
    fn from(summary: WorkspaceSummary) -> Self {
        Self {
            workspace_id: summary.workspace_id,
            title: summary.title,
            total_chapters: summary.total_chapters,
            last_activity: summary.last_activity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContextPreviewDto {
    pub workspace_id: String,
    pub context: String,
    pub chapter_context: String,
}

impl From<ContextPreviewResponse> for ContextPreviewDto {
    fn from(resp: ContextPreviewResponse) -> Self {
        Self {
            workspace_id: resp.workspace_id,
            context: resp.context,
            chapter_context: resp.chapter_context,
        }
    }
}

// ============================================================================
// Outline / Asset DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OutlineDto {
    pub workspace_id: String,
    pub total_chapters: usize,
    pub outline: Vec<OutlineEntry>,
}

impl From<OutlineResponse> for OutlineDto {
    fn from(resp: OutlineResponse) -> Self {
        Self {
            workspace_id: resp.workspace_id,
            total_chapters: resp.outline.len(),
            outline: resp.outline.entries().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterDto {
    pub workspace_id: String,
    pub index: usize,
    pub title: String,
    pub beat: String,
}

impl From<ChapterResponse> for ChapterDto {
    fn from(resp: ChapterResponse) -> Self {
        Self {
            workspace_id: resp.workspace_id,
            index: resp.index,
            title: resp.chapter.title,
            beat: resp.chapter.beat,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssetDto {
    pub workspace_id: String,
    pub kind: AssetKind,
    pub text: String,
}

impl From<AssetResponse> for AssetDto {
    fn from(resp: AssetResponse) -> Self {
        Self {
            workspace_id: resp.workspace_id,
            kind: resp.kind,
            text: resp.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterContentDto {
    pub workspace_id: String,
    pub index: usize,
    pub content: String,
}

impl From<WriteChapterResponse> for ChapterContentDto {
    fn from(resp: WriteChapterResponse) -> Self {
        Self {
            workspace_id: resp.workspace_id,
            index: resp.index,
            content: resp.content,
        }
    }
}

// ============================================================================
// Options DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OptionItemDto {
    pub value: String,
    pub label: String,
}

impl From<OptionItem> for OptionItemDto {
    fn from(item: OptionItem) -> Self {
        Self {
            value: item.value,
            label: item.label,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionsDto {
    pub lengths: Vec<OptionItemDto>,
    pub themes: Vec<OptionItemDto>,
    pub characters: Vec<OptionItemDto>,
    pub plots: Vec<OptionItemDto>,
    pub author_styles: Vec<OptionItemDto>,
    pub asset_kinds: Vec<OptionItemDto>,
}

fn items(items: Vec<OptionItem>) -> Vec<OptionItemDto> {
    items.into_iter().map(OptionItemDto::from).collect()
}

impl From<OptionsResponse> for OptionsDto {
    fn from(resp: OptionsResponse) -> Self {
        Self {
            lengths: items(resp.lengths),
            themes: items(resp.themes),
            characters: items(resp.characters),
            plots: items(resp.plots),
            author_styles: items(resp.author_styles),
            asset_kinds: items(resp.asset_kinds),
        }
    }
}
