//! Workspace Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    CloseWorkspace, CreateWorkspace, GetWorkspace, ListWorkspaces, PreviewContext,
    UpdateSettings,
};
use crate::domain::creative::CreativeContext;
use crate::infrastructure::http::dto::{
    ApiResponse, ContextPreviewDto, Empty, WorkspaceDto, WorkspaceIdRequest, WorkspaceSummaryDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Create
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceRequest {
    #[serde(default)]
    pub context: CreativeContext,
    pub chapter_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreateWorkspaceResponseDto {
    pub workspace_id: String,
}

pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateWorkspaceRequest>,
) -> Result<Json<ApiResponse<CreateWorkspaceResponseDto>>, ApiError> {
    let cmd = CreateWorkspace {
        context: req.context,
        chapter_count: req.chapter_count,
    };

    let result = state.create_workspace_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(CreateWorkspaceResponseDto {
        workspace_id: result.workspace_id,
    })))
}

// ============================================================================
// Get / List / Context
// ============================================================================

pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceIdRequest>,
) -> Result<Json<ApiResponse<WorkspaceDto>>, ApiError> {
    let query = GetWorkspace {
        workspace_id: req.workspace_id,
    };
    let result = state.get_workspace_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(WorkspaceDto::from(result))))
}

pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<WorkspaceSummaryDto>>>, ApiError> {
    let result = state.list_workspaces_handler.handle(ListWorkspaces).await?;
    Ok(Json(ApiResponse::success(
        result.into_iter().map(WorkspaceSummaryDto::from).collect(),
    )))
}

pub async fn preview_context(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceIdRequest>,
) -> Result<Json<ApiResponse<ContextPreviewDto>>, ApiError> {
    let query = PreviewContext {
        workspace_id: req.workspace_id,
    };
    let result = state.preview_context_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(ContextPreviewDto::from(result))))
}

// ============================================================================
// Update Settings
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub workspace_id: String,
    pub context: CreativeContext,
    pub chapter_count: u32,
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = UpdateSettings {
        workspace_id: req.workspace_id,
        context: req.context,
        chapter_count: req.chapter_count,
    };

    state.update_settings_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::ok()))
}

// ============================================================================
// Close
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CloseWorkspaceResponseDto {
    pub workspace_id: String,
    pub cleared_slots: usize,
}

pub async fn close_workspace(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceIdRequest>,
) -> Result<Json<ApiResponse<CloseWorkspaceResponseDto>>, ApiError> {
    let cmd = CloseWorkspace {
        workspace_id: req.workspace_id,
    };

    let result = state.close_workspace_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(CloseWorkspaceResponseDto {
        workspace_id: result.workspace_id,
        cleared_slots: result.cleared_slots,
    })))
}
