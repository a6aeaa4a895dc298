//! Options Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListOptions;
use crate::infrastructure::http::dto::{ApiResponse, OptionsDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn list_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<OptionsDto>>, ApiError> {
    let result = state.list_options_handler.handle(ListOptions).await?;
    Ok(Json(ApiResponse::success(OptionsDto::from(result))))
}
