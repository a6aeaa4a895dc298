//! WebSocket Handler - 工作区事件推送

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::infrastructure::http::state::AppState;

/// 工作区 WebSocket 连接处理（槽位/大纲/内容变更通知）
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(workspace_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_workspace_socket(socket, workspace_id, state))
}

async fn handle_workspace_socket(socket: WebSocket, workspace_id: String, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // 验证工作区存在
    if !state.workspace_manager.exists(&workspace_id) {
        tracing::warn!(workspace_id = %workspace_id, "WebSocket connection rejected: unknown workspace");
        let _ = sender.close().await;
        return;
    }

    // 注册事件接收器
    let mut event_rx = state.event_publisher.register_workspace(&workspace_id);

    tracing::info!(workspace_id = %workspace_id, "WebSocket connected");

    let workspace_id_for_forward = workspace_id.clone();
    let workspace_id_for_receive = workspace_id.clone();

    // 事件转发任务
    let mut forward_task = tokio::spawn(async move {
        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        workspace_id = %workspace_id_for_forward,
                        skipped = skipped,
                        "WebSocket client lagging, events dropped"
                    );
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(
                    workspace_id = %workspace_id_for_forward,
                    error = %e,
                    "Failed to send WebSocket message"
                );
                break;
            }
        }
    });

    // 接收客户端消息（心跳）
    let workspace_manager = state.workspace_manager.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!(workspace_id = %workspace_id_for_receive, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(workspace_id = %workspace_id_for_receive, error = %e, "WebSocket error");
                    break;
                }
                _ => {
                    // 任意消息视为活动（含 ping）
                    workspace_manager.touch(&workspace_id_for_receive);
                }
            }
        }
    });

    // 等待任一任务完成，另一个随之终止
    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => forward_task.abort(),
    }
    let _ = forward_task.await;

    // 清理
    state.event_publisher.unregister_workspace(&workspace_id);
    tracing::info!(workspace_id = %workspace_id, "WebSocket disconnected");
}
