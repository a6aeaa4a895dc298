//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（GenerationEngine、WorkspaceManager、SlotRegistry）
//! - generation_client: 提示词 + 生成请求 + 结果校验
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod generation_client;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Workspace commands
    CloseWorkspace,
    CloseWorkspaceResponse,
    CreateWorkspace,
    CreateWorkspaceResponse,
    UpdateAsset,
    UpdateSettings,
    // Outline commands
    AddChapter,
    DeleteChapter,
    OutlineResponse,
    UpdateChapterField,
    // Generation commands
    AssetResponse,
    ChapterResponse,
    GenerateAsset,
    GenerateMoreChapters,
    GenerateOpeningOutline,
    GenerateOutline,
    RegenerateChapter,
    SuggestBeat,
    WriteChapter,
    WriteChapterResponse,
    // Handlers
    handlers::{
        AddChapterHandler, CloseWorkspaceHandler, CreateWorkspaceHandler, DeleteChapterHandler,
        GenerateAssetHandler, GenerateMoreChaptersHandler, GenerateOpeningOutlineHandler,
        GenerateOutlineHandler, GenerationDeps, RegenerateChapterHandler, SlotExecutor,
        SuggestBeatHandler, UpdateAssetHandler, UpdateChapterFieldHandler, UpdateSettingsHandler,
        WriteChapterHandler,
    },
};

pub use error::ApplicationError;

pub use generation_client::{GenerationClient, GenerationFailed};

pub use ports::{
    // Generation engine
    GenerationEnginePort,
    GenerationError,
    GenerationRequest,
    ModelTier,
    // Slot registry
    SlotError,
    SlotGuard,
    SlotKey,
    SlotRegistryPort,
    // Workspace manager
    WorkspaceManagerPort,
    WorkspaceUpdate,
};

pub use queries::{
    GetWorkspace,
    ListOptions,
    ListWorkspaces,
    PreviewContext,
    // Handlers
    handlers::{
        ContextPreviewResponse, GetWorkspaceHandler, ListOptionsHandler, ListWorkspacesHandler,
        OptionItem, OptionsResponse, PreviewContextHandler, WorkspaceResponse, WorkspaceSummary,
    },
};
