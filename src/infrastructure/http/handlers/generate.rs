//! Generate Handlers - 生成请求
//!
//! 请求在生成完成后才返回；同一槽位已有在途请求时返回 errno 409

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{
    GenerateAsset, GenerateMoreChapters, GenerateOpeningOutline, GenerateOutline,
    RegenerateChapter, SuggestBeat, WriteChapter,
};
use crate::domain::asset::AssetKind;
use crate::infrastructure::http::dto::{
    ApiResponse, AssetDto, ChapterContentDto, ChapterDto, ChapterIndexRequest, OutlineDto,
    WorkspaceIdRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Outline producers
// ============================================================================

pub async fn generate_outline(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceIdRequest>,
) -> Result<Json<ApiResponse<OutlineDto>>, ApiError> {
    let cmd = GenerateOutline {
        workspace_id: req.workspace_id,
    };
    let result = state.generate_outline_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(OutlineDto::from(result))))
}

pub async fn generate_more_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceIdRequest>,
) -> Result<Json<ApiResponse<OutlineDto>>, ApiError> {
    let cmd = GenerateMoreChapters {
        workspace_id: req.workspace_id,
    };
    let result = state.generate_more_chapters_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(OutlineDto::from(result))))
}

pub async fn generate_opening_outline(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceIdRequest>,
) -> Result<Json<ApiResponse<OutlineDto>>, ApiError> {
    let cmd = GenerateOpeningOutline {
        workspace_id: req.workspace_id,
    };
    let result = state.generate_opening_outline_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(OutlineDto::from(result))))
}

// ============================================================================
// Single chapter
// ============================================================================

pub async fn regenerate_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterIndexRequest>,
) -> Result<Json<ApiResponse<ChapterDto>>, ApiError> {
    let cmd = RegenerateChapter {
        workspace_id: req.workspace_id,
        index: req.index,
    };
    let result = state.regenerate_chapter_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(ChapterDto::from(result))))
}

pub async fn suggest_beat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterIndexRequest>,
) -> Result<Json<ApiResponse<ChapterDto>>, ApiError> {
    let cmd = SuggestBeat {
        workspace_id: req.workspace_id,
        index: req.index,
    };
    let result = state.suggest_beat_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(ChapterDto::from(result))))
}

pub async fn write_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterIndexRequest>,
) -> Result<Json<ApiResponse<ChapterContentDto>>, ApiError> {
    let cmd = WriteChapter {
        workspace_id: req.workspace_id,
        index: req.index,
    };
    let result = state.write_chapter_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(ChapterContentDto::from(result))))
}

// ============================================================================
// Assets
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateAssetRequest {
    pub workspace_id: String,
    pub kind: AssetKind,
}

pub async fn generate_asset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateAssetRequest>,
) -> Result<Json<ApiResponse<AssetDto>>, ApiError> {
    let cmd = GenerateAsset {
        workspace_id: req.workspace_id,
        kind: req.kind,
    };
    let result = state.generate_asset_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(AssetDto::from(result))))
}
