//! Ping Handler - 健康检查

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    /// 生成服务不可用时为 degraded
    pub status: &'static str,
    pub version: &'static str,
    /// 当前内存中的工作区数量
    pub workspaces: usize,
    pub generation_available: bool,
}

pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let generation_available = state.generation_client.health_check().await;
    if !generation_available {
        tracing::warn!("Generation service health check failed");
    }

    Json(PingResponse {
        status: if generation_available { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        workspaces: state.workspace_manager.list_all().len(),
        generation_available,
    })
}
