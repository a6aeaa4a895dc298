//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                     GET   健康检查
//! - /api/options                  GET   表单枚举选项
//! - /api/workspace/create         POST  创建工作区
//! - /api/workspace/get            POST  获取工作区（含忙碌槽位）
//! - /api/workspace/update         POST  更新创作参数
//! - /api/workspace/close          POST  关闭工作区
//! - /api/workspace/context        POST  预览组装后的上下文
//! - /api/workspace/list           GET   列出工作区
//! - /api/outline/add              POST  追加占位章节
//! - /api/outline/delete           POST  删除章节
//! - /api/outline/update           POST  修改章节标题/节拍
//! - /api/asset/update             POST  手动编辑生成内容
//! - /api/generate/outline         POST  生成大纲
//! - /api/generate/more            POST  续写章节
//! - /api/generate/opening         POST  黄金三章
//! - /api/generate/regenerate      POST  重新生成单章
//! - /api/generate/suggest_beat    POST  节拍建议
//! - /api/generate/asset           POST  生成辅助设定
//! - /api/generate/chapter         POST  撰写章节正文
//! - /ws/workspace/{id}            WS    工作区事件（槽位/大纲/内容变更）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/workspace/:workspace_id", get(handlers::websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/options", get(handlers::list_options))
        .nest("/workspace", workspace_routes())
        .nest("/outline", outline_routes())
        .route("/asset/update", post(handlers::update_asset))
        .nest("/generate", generate_routes())
}

/// Workspace 路由
fn workspace_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_workspace))
        .route("/get", post(handlers::get_workspace))
        .route("/update", post(handlers::update_settings))
        .route("/close", post(handlers::close_workspace))
        .route("/context", post(handlers::preview_context))
        .route("/list", get(handlers::list_workspaces))
}

/// Outline 路由
fn outline_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add", post(handlers::add_chapter))
        .route("/delete", post(handlers::delete_chapter))
        .route("/update", post(handlers::update_chapter_field))
}

/// Generate 路由
fn generate_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/outline", post(handlers::generate_outline))
        .route("/more", post(handlers::generate_more_chapters))
        .route("/opening", post(handlers::generate_opening_outline))
        .route("/regenerate", post(handlers::regenerate_chapter))
        .route("/suggest_beat", post(handlers::suggest_beat))
        .route("/asset", post(handlers::generate_asset))
        .route("/chapter", post(handlers::write_chapter))
}
