//! Asset Handlers - 生成内容手动编辑

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::UpdateAsset;
use crate::domain::asset::AssetKind;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateAssetRequest {
    pub workspace_id: String,
    pub kind: AssetKind,
    pub text: String,
}

pub async fn update_asset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateAssetRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = UpdateAsset {
        workspace_id: req.workspace_id,
        kind: req.kind,
        text: req.text,
    };
    state.update_asset_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::ok()))
}
