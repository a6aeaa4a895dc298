//! Novelist - AI 辅助小说大纲创作服务
//!
//! 架构:
//! - Domain: creative/, outline/, asset/, prompt/, workspace/
//! - Application: commands, queries, ports, generation_client
//! - Infrastructure: http, memory, worker, adapters, events

use std::sync::Arc;
use std::time::Duration;

use novelist::application::ports::{GenerationEnginePort, SlotRegistryPort, WorkspaceManagerPort};
use novelist::application::GenerationClient;
use novelist::config::{load_config, print_config, AppConfig, GenerationProvider};
use novelist::infrastructure::adapters::{
    FakeGenerationClient, HttpGeminiClient, HttpGeminiClientConfig,
};
use novelist::infrastructure::events::EventPublisher;
use novelist::infrastructure::http::{AppState, HttpServer, ServerConfig};
use novelist::infrastructure::memory::{InMemorySlotRegistry, InMemoryWorkspaceManager};
use novelist::infrastructure::worker::{WorkspaceSweeper, WorkspaceSweeperConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Novelist - AI 辅助小说大纲创作服务");
    print_config(&config);

    // 生成引擎
    let engine = build_generation_engine(&config)?;
    let generation_client = Arc::new(GenerationClient::new(
        engine,
        config.generation.temperature,
    ));

    // 内存状态与事件
    let workspace_manager: Arc<dyn WorkspaceManagerPort> = Arc::new(InMemoryWorkspaceManager::new());
    let slot_registry: Arc<dyn SlotRegistryPort> = Arc::new(InMemorySlotRegistry::new());
    let event_publisher = Arc::new(EventPublisher::new());

    // 空闲工作区回收
    let sweeper = WorkspaceSweeper::new(
        WorkspaceSweeperConfig {
            interval: Duration::from_secs(config.workspace.sweep_interval_secs),
            idle_expire_secs: config.workspace.idle_expire_secs,
        },
        workspace_manager.clone(),
        slot_registry.clone(),
        event_publisher.clone(),
    );
    tokio::spawn(sweeper.run());

    // HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if let Some(dir) = &config.server.static_files {
        server_config = server_config.with_static_files(dir);
    }
    let state = AppState::new(
        workspace_manager,
        slot_registry,
        generation_client,
        event_publisher,
        config.workspace.max_chapter_count,
    );

    let server = HttpServer::new(server_config, Arc::new(state));

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（`RUST_LOG` 优先于配置）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},novelist={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_generation_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn GenerationEnginePort>> {
    let generation = &config.generation;
    match generation.provider {
        GenerationProvider::Gemini => {
            let client_config =
                HttpGeminiClientConfig::new(&generation.base_url, &generation.api_key)
                    .with_timeout(generation.timeout_secs)
                    .with_models(&generation.standard_model, &generation.advanced_model);
            Ok(Arc::new(HttpGeminiClient::new(client_config)?))
        }
        GenerationProvider::Fake => {
            tracing::warn!("Using fake generation provider, outputs are fixed samples");
            Ok(Arc::new(FakeGenerationClient::new()))
        }
    }
}
