//! Outline Handlers - 大纲手动编辑

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{AddChapter, DeleteChapter, UpdateChapterField};
use crate::domain::outline::OutlineField;
use crate::infrastructure::http::dto::{
    ApiResponse, ChapterIndexRequest, OutlineDto, WorkspaceIdRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn add_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceIdRequest>,
) -> Result<Json<ApiResponse<OutlineDto>>, ApiError> {
    let cmd = AddChapter {
        workspace_id: req.workspace_id,
    };
    let result = state.add_chapter_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(OutlineDto::from(result))))
}

pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterIndexRequest>,
) -> Result<Json<ApiResponse<OutlineDto>>, ApiError> {
    let cmd = DeleteChapter {
        workspace_id: req.workspace_id,
        index: req.index,
    };
    let result = state.delete_chapter_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(OutlineDto::from(result))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateChapterFieldRequest {
    pub workspace_id: String,
    pub index: usize,
    pub field: OutlineField,
    pub value: String,
}

pub async fn update_chapter_field(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateChapterFieldRequest>,
) -> Result<Json<ApiResponse<OutlineDto>>, ApiError> {
    let cmd = UpdateChapterField {
        workspace_id: req.workspace_id,
        index: req.index,
        field: req.field,
        value: req.value,
    };
    let result = state.update_chapter_field_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(OutlineDto::from(result))))
}
