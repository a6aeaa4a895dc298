//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddChapterHandler, CloseWorkspaceHandler, CreateWorkspaceHandler, DeleteChapterHandler,
    GenerateAssetHandler, GenerateMoreChaptersHandler, GenerateOpeningOutlineHandler,
    GenerateOutlineHandler, GenerationDeps, RegenerateChapterHandler, SlotExecutor,
    SuggestBeatHandler, UpdateAssetHandler, UpdateChapterFieldHandler, UpdateSettingsHandler,
    WriteChapterHandler,
    // Query handlers
    GetWorkspaceHandler, ListOptionsHandler, ListWorkspacesHandler, PreviewContextHandler,
    // Ports
    GenerationClient, SlotRegistryPort, WorkspaceManagerPort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
///
/// 工作区与槽位均为内存实现
pub struct AppState {
    // ========== Ports ==========
    pub workspace_manager: Arc<dyn WorkspaceManagerPort>,
    pub slot_registry: Arc<dyn SlotRegistryPort>,
    pub generation_client: Arc<GenerationClient>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub create_workspace_handler: CreateWorkspaceHandler,
    pub update_settings_handler: UpdateSettingsHandler,
    pub close_workspace_handler: CloseWorkspaceHandler,
    pub update_asset_handler: UpdateAssetHandler,
    pub add_chapter_handler: AddChapterHandler,
    pub delete_chapter_handler: DeleteChapterHandler,
    pub update_chapter_field_handler: UpdateChapterFieldHandler,
    pub generate_outline_handler: GenerateOutlineHandler,
    pub generate_more_chapters_handler: GenerateMoreChaptersHandler,
    pub generate_opening_outline_handler: GenerateOpeningOutlineHandler,
    pub regenerate_chapter_handler: RegenerateChapterHandler,
    pub suggest_beat_handler: SuggestBeatHandler,
    pub generate_asset_handler: GenerateAssetHandler,
    pub write_chapter_handler: WriteChapterHandler,

    // ========== Query Handlers ==========
    pub get_workspace_handler: GetWorkspaceHandler,
    pub list_workspaces_handler: ListWorkspacesHandler,
    pub preview_context_handler: PreviewContextHandler,
    pub list_options_handler: ListOptionsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        workspace_manager: Arc<dyn WorkspaceManagerPort>,
        slot_registry: Arc<dyn SlotRegistryPort>,
        generation_client: Arc<GenerationClient>,
        event_publisher: Arc<EventPublisher>,
        max_chapter_count: u32,
    ) -> Self {
        let deps = GenerationDeps {
            workspace_manager: workspace_manager.clone(),
            generation_client: generation_client.clone(),
            slot_executor: Arc::new(SlotExecutor::new(
                slot_registry.clone(),
                event_publisher.clone(),
            )),
            event_publisher: event_publisher.clone(),
        };

        Self {
            // Ports
            workspace_manager: workspace_manager.clone(),
            slot_registry: slot_registry.clone(),
            generation_client,
            event_publisher: event_publisher.clone(),

            // Command handlers
            create_workspace_handler: CreateWorkspaceHandler::new(
                workspace_manager.clone(),
                max_chapter_count,
            ),
            update_settings_handler: UpdateSettingsHandler::new(
                workspace_manager.clone(),
                max_chapter_count,
            ),
            close_workspace_handler: CloseWorkspaceHandler::new(
                workspace_manager.clone(),
                slot_registry.clone(),
                event_publisher.clone(),
            ),
            update_asset_handler: UpdateAssetHandler::new(
                workspace_manager.clone(),
                event_publisher.clone(),
            ),
            add_chapter_handler: AddChapterHandler::new(
                workspace_manager.clone(),
                event_publisher.clone(),
            ),
            delete_chapter_handler: DeleteChapterHandler::new(
                workspace_manager.clone(),
                event_publisher.clone(),
            ),
            update_chapter_field_handler: UpdateChapterFieldHandler::new(
                workspace_manager.clone(),
                event_publisher.clone(),
            ),
            generate_outline_handler: GenerateOutlineHandler::new(deps.clone()),
            generate_more_chapters_handler: GenerateMoreChaptersHandler::new(deps.clone()),
            generate_opening_outline_handler: GenerateOpeningOutlineHandler::new(deps.clone()),
            regenerate_chapter_handler: RegenerateChapterHandler::new(deps.clone()),
            suggest_beat_handler: SuggestBeatHandler::new(deps.clone()),
            generate_asset_handler: GenerateAssetHandler::new(deps.clone()),
            write_chapter_handler: WriteChapterHandler::new(deps),

            // Query handlers
            get_workspace_handler: GetWorkspaceHandler::new(
                workspace_manager.clone(),
                slot_registry.clone(),
            ),
            list_workspaces_handler: ListWorkspacesHandler::new(workspace_manager.clone()),
            preview_context_handler: PreviewContextHandler::new(workspace_manager),
            list_options_handler: ListOptionsHandler::new(),
        }
    }
}
