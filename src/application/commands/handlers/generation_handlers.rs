//! Generation Command Handlers
//!
//! 流程：读取工作区快照 → 校验前置条件（不满足则不发请求）→ 占用槽位 →
//! 调用 GenerationClient → 成功才写回工作区。失败时工作区保持原样。

use std::sync::Arc;

use super::slot_executor::{require_title, SlotExecutor};
use crate::application::commands::generation_commands::*;
use crate::application::commands::outline_commands::OutlineResponse;
use crate::application::error::ApplicationError;
use crate::application::generation_client::GenerationClient;
use crate::application::ports::{SlotKey, WorkspaceManagerPort};
use crate::domain::asset::AssetKind;
use crate::domain::creative::{build_chapter_context, build_context};
use crate::domain::outline::OutlineField;
use crate::domain::workspace::Workspace;
use crate::infrastructure::events::EventPublisher;

/// 生成命令共享的依赖
#[derive(Clone)]
pub struct GenerationDeps {
    pub workspace_manager: Arc<dyn WorkspaceManagerPort>,
    pub generation_client: Arc<GenerationClient>,
    pub slot_executor: Arc<SlotExecutor>,
    pub event_publisher: Arc<EventPublisher>,
}

impl GenerationDeps {
    fn outline_response(&self, workspace_id: &str) -> Result<OutlineResponse, ApplicationError> {
        let outline = self.workspace_manager.get(workspace_id)?.outline().clone();
        self.event_publisher
            .publish_outline_changed(workspace_id, outline.len());
        Ok(OutlineResponse {
            workspace_id: workspace_id.to_string(),
            outline,
        })
    }

    fn chapter_response(
        &self,
        workspace_id: &str,
        index: usize,
    ) -> Result<ChapterResponse, ApplicationError> {
        let workspace = self.workspace_manager.get(workspace_id)?;
        let chapter = workspace.chapter(index)?.clone();
        self.event_publisher
            .publish_outline_changed(workspace_id, workspace.outline().len());
        Ok(ChapterResponse {
            workspace_id: workspace_id.to_string(),
            index,
            chapter,
        })
    }
}

/// Generate Outline Handler - 按请求章节数生成完整大纲
pub struct GenerateOutlineHandler {
    deps: GenerationDeps,
}

impl GenerateOutlineHandler {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub async fn handle(&self, cmd: GenerateOutline) -> Result<OutlineResponse, ApplicationError> {
        let workspace = self.deps.workspace_manager.get(&cmd.workspace_id)?;
        require_title(&workspace)?;

        let busy = self
            .deps
            .slot_executor
            .begin(&cmd.workspace_id, SlotKey::Outline)?;
        let context = build_context(workspace.context());
        let entries = self
            .deps
            .generation_client
            .generate_outline(&context, workspace.chapter_count())
            .await
            .map_err(|e| busy.fail(e))?;

        let total = entries.len();
        self.deps.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.reset_outline(entries);
                Ok(())
            }),
        )?;
        drop(busy);

        tracing::info!(
            workspace_id = %cmd.workspace_id,
            total_chapters = total,
            "Outline generated"
        );
        self.deps.outline_response(&cmd.workspace_id)
    }
}

/// Generate More Chapters Handler - 在现有大纲后续写
pub struct GenerateMoreChaptersHandler {
    deps: GenerationDeps,
}

impl GenerateMoreChaptersHandler {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub async fn handle(
        &self,
        cmd: GenerateMoreChapters,
    ) -> Result<OutlineResponse, ApplicationError> {
        let workspace = self.deps.workspace_manager.get(&cmd.workspace_id)?;
        require_title(&workspace)?;
        if workspace.outline().is_empty() {
            return Err(ApplicationError::validation(
                "请先生成大纲 | Please generate an outline first.",
            ));
        }

        let busy = self
            .deps
            .slot_executor
            .begin(&cmd.workspace_id, SlotKey::MoreChapters)?;
        let context = build_context(workspace.context());
        let entries = self
            .deps
            .generation_client
            .generate_more_chapters(
                &context,
                workspace.chapter_count(),
                workspace.outline().entries(),
            )
            .await
            .map_err(|e| busy.fail(e))?;

        let added = entries.len();
        self.deps.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.append_chapters(entries);
                Ok(())
            }),
        )?;
        drop(busy);

        tracing::info!(
            workspace_id = %cmd.workspace_id,
            added_chapters = added,
            "Outline extended"
        );
        self.deps.outline_response(&cmd.workspace_id)
    }
}

/// Generate Opening Outline Handler - 黄金三章
pub struct GenerateOpeningOutlineHandler {
    deps: GenerationDeps,
}

impl GenerateOpeningOutlineHandler {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub async fn handle(
        &self,
        cmd: GenerateOpeningOutline,
    ) -> Result<OutlineResponse, ApplicationError> {
        let workspace = self.deps.workspace_manager.get(&cmd.workspace_id)?;
        require_title(&workspace)?;

        let busy = self
            .deps
            .slot_executor
            .begin(&cmd.workspace_id, SlotKey::Opening)?;
        let context = build_context(workspace.context());
        let entries = self
            .deps
            .generation_client
            .generate_opening_outline(&context)
            .await
            .map_err(|e| busy.fail(e))?;

        self.deps.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.replace_outline(entries);
                Ok(())
            }),
        )?;
        drop(busy);

        tracing::info!(workspace_id = %cmd.workspace_id, "Opening outline generated");
        self.deps.outline_response(&cmd.workspace_id)
    }
}

/// Regenerate Chapter Handler - 重写单章，其余章节不变
pub struct RegenerateChapterHandler {
    deps: GenerationDeps,
}

impl RegenerateChapterHandler {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub async fn handle(
        &self,
        cmd: RegenerateChapter,
    ) -> Result<ChapterResponse, ApplicationError> {
        let workspace = self.deps.workspace_manager.get(&cmd.workspace_id)?;
        require_title(&workspace)?;
        let target = workspace.chapter(cmd.index)?.clone();

        let busy = self
            .deps
            .slot_executor
            .begin(&cmd.workspace_id, SlotKey::Regenerate(cmd.index))?;
        let context = build_context(workspace.context());
        let entry = self
            .deps
            .generation_client
            .regenerate_chapter(&context, workspace.outline().entries(), cmd.index)
            .await
            .map_err(|e| busy.fail(e))?;

        let index = cmd.index;
        self.deps.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.expect_chapter(index, &target)?;
                ws.replace_chapter(index, entry).map(|_| ())
            }),
        )?;
        drop(busy);

        tracing::info!(workspace_id = %cmd.workspace_id, index = index, "Chapter regenerated");
        self.deps.chapter_response(&cmd.workspace_id, index)
    }
}

/// Suggest Beat Handler - 只替换目标章节的节拍
pub struct SuggestBeatHandler {
    deps: GenerationDeps,
}

impl SuggestBeatHandler {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub async fn handle(&self, cmd: SuggestBeat) -> Result<ChapterResponse, ApplicationError> {
        let workspace = self.deps.workspace_manager.get(&cmd.workspace_id)?;
        require_title(&workspace)?;
        let target = workspace.chapter(cmd.index)?.clone();

        let busy = self
            .deps
            .slot_executor
            .begin(&cmd.workspace_id, SlotKey::SuggestBeat(cmd.index))?;
        let context = build_context(workspace.context());
        let beat = self
            .deps
            .generation_client
            .suggest_beat(&context, workspace.outline().entries(), cmd.index)
            .await
            .map_err(|e| busy.fail(e))?;

        let index = cmd.index;
        self.deps.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.expect_chapter(index, &target)?;
                ws.update_chapter_field(index, OutlineField::Beat, beat)
            }),
        )?;
        drop(busy);

        tracing::debug!(workspace_id = %cmd.workspace_id, index = index, "Beat suggested");
        self.deps.chapter_response(&cmd.workspace_id, index)
    }
}

/// Generate Asset Handler - 辅助设定（梗概、钩子、金手指等）
pub struct GenerateAssetHandler {
    deps: GenerationDeps,
}

impl GenerateAssetHandler {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub async fn handle(&self, cmd: GenerateAsset) -> Result<AssetResponse, ApplicationError> {
        if !cmd.kind.is_auxiliary() {
            return Err(ApplicationError::validation(
                "章节正文请通过章节写作生成 | Use chapter writing to generate chapter content.",
            ));
        }

        let workspace = self.deps.workspace_manager.get(&cmd.workspace_id)?;
        require_title(&workspace)?;

        let busy = self
            .deps
            .slot_executor
            .begin(&cmd.workspace_id, SlotKey::Asset(cmd.kind))?;
        let context = build_context(workspace.context());
        let text = self
            .deps
            .generation_client
            .generate_asset(
                cmd.kind,
                &context,
                workspace.assets().get(AssetKind::Synopsis),
            )
            .await
            .map_err(|e| busy.fail(e))?;

        let kind = cmd.kind;
        let stored = text.clone();
        self.deps.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.set_asset(kind, stored);
                Ok(())
            }),
        )?;
        drop(busy);

        self.deps
            .event_publisher
            .publish_asset_changed(&cmd.workspace_id, kind);
        tracing::info!(workspace_id = %cmd.workspace_id, kind = %kind, "Asset generated");

        Ok(AssetResponse {
            workspace_id: cmd.workspace_id,
            kind,
            text,
        })
    }
}

/// Write Chapter Handler - 以完整上下文撰写单章正文
pub struct WriteChapterHandler {
    deps: GenerationDeps,
}

impl WriteChapterHandler {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub async fn handle(
        &self,
        cmd: WriteChapter,
    ) -> Result<WriteChapterResponse, ApplicationError> {
        let workspace = self.deps.workspace_manager.get(&cmd.workspace_id)?;
        require_title(&workspace)?;
        let target = workspace.chapter(cmd.index)?.clone();

        let busy = self
            .deps
            .slot_executor
            .begin(&cmd.workspace_id, SlotKey::Chapter)?;
        let full_context = build_chapter_context(
            workspace.context(),
            workspace.assets(),
            workspace.outline(),
        );
        let content = self
            .deps
            .generation_client
            .generate_chapter_content(
                &full_context,
                &target.title,
                &target.beat,
                &workspace.context().author_style,
            )
            .await
            .map_err(|e| busy.fail(e))?;

        let index = cmd.index;
        let stored = content.clone();
        self.deps.workspace_manager.update(
            &cmd.workspace_id,
            Box::new(move |ws: &mut Workspace| {
                ws.expect_chapter(index, &target)?;
                ws.set_chapter_body(index, stored)
            }),
        )?;
        drop(busy);

        self.deps
            .event_publisher
            .publish_asset_changed(&cmd.workspace_id, AssetKind::Chapter);
        tracing::info!(
            workspace_id = %cmd.workspace_id,
            index = index,
            content_len = content.chars().count(),
            "Chapter written"
        );

        Ok(WriteChapterResponse {
            workspace_id: cmd.workspace_id,
            index,
            content,
        })
    }
}
