//! Generation Client - 面向创作产物的生成请求
//!
//! 每个操作：拼装提示词（可选输出约束）→ 通过 GenerationEnginePort 发起一次请求 →
//! 返回自由文本或经完整校验的结构化大纲。
//!
//! 失败语义：传输错误与解析/校验错误都在此处记录完整原因，
//! 对调用方只暴露统一的 [`GenerationFailed`]。不做重试。

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{GenerationEnginePort, GenerationRequest, ModelTier};
use crate::domain::asset::AssetKind;
use crate::domain::creative::{AuthorStyle, Choice};
use crate::domain::outline::OutlineEntry;
use crate::domain::prompt;

/// 默认采样温度（自由文本请求）
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// 开篇大纲的章节数
pub const OPENING_CHAPTERS: usize = 3;

/// 统一的生成失败错误（上游原因只写日志）
#[derive(Debug, Error)]
#[error("生成失败，请重试。| Failed to generate. Please try again.")]
pub struct GenerationFailed {
    pub operation: &'static str,
}

/// 多章节结构化结果
#[derive(Debug, Deserialize)]
struct OutlinePayload {
    outline: Vec<OutlineEntry>,
}

/// 去掉模型偶尔附带的 Markdown 代码围栏
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// 解析并校验多章节结果
///
/// 缺少 outline 字段、非数组、条目缺少 title/beat 或为空列表均视为失败
pub fn parse_outline(raw: &str) -> Result<Vec<OutlineEntry>, String> {
    let payload: OutlinePayload = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| format!("invalid outline payload: {}", e))?;
    if payload.outline.is_empty() {
        return Err("outline payload contains no chapters".to_string());
    }
    Ok(payload.outline)
}

/// 解析并校验单章节结果
pub fn parse_chapter(raw: &str) -> Result<OutlineEntry, String> {
    serde_json::from_str(strip_code_fence(raw)).map_err(|e| format!("invalid chapter payload: {}", e))
}

/// Generation Client
pub struct GenerationClient {
    engine: Arc<dyn GenerationEnginePort>,
    temperature: f32,
}

impl GenerationClient {
    pub fn new(engine: Arc<dyn GenerationEnginePort>, temperature: f32) -> Self {
        Self {
            engine,
            temperature,
        }
    }

    #[cfg(test)]
    pub fn with_default_temperature(engine: Arc<dyn GenerationEnginePort>) -> Self {
        Self::new(engine, DEFAULT_TEMPERATURE)
    }

    /// 生成服务是否可用
    pub async fn health_check(&self) -> bool {
        self.engine.health_check().await
    }

    /// 发起一次请求，失败时记录原因并折叠为 GenerationFailed
    async fn call(
        &self,
        operation: &'static str,
        request: GenerationRequest,
    ) -> Result<String, GenerationFailed> {
        tracing::debug!(
            operation,
            prompt_len = request.prompt.len(),
            structured = request.is_structured(),
            tier = ?request.tier,
            "Sending generation request"
        );

        match self.engine.generate(request).await {
            Ok(text) => {
                tracing::info!(operation, response_len = text.len(), "Generation completed");
                Ok(text)
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "Generation request failed");
                Err(GenerationFailed { operation })
            }
        }
    }

    async fn call_text(
        &self,
        operation: &'static str,
        prompt: String,
    ) -> Result<String, GenerationFailed> {
        let request = GenerationRequest::text(prompt).with_temperature(self.temperature);
        self.call(operation, request).await
    }

    async fn call_outline(
        &self,
        operation: &'static str,
        prompt: String,
        expected: usize,
    ) -> Result<Vec<OutlineEntry>, GenerationFailed> {
        let request = GenerationRequest::structured(prompt, prompt::outline_schema());
        let raw = self.call(operation, request).await?;

        let entries = parse_outline(&raw).map_err(|e| {
            tracing::error!(operation, error = %e, "Structured response rejected");
            GenerationFailed { operation }
        })?;

        if entries.len() != expected {
            tracing::warn!(
                operation,
                expected,
                received = entries.len(),
                "Chapter count differs from request"
            );
        }
        Ok(entries)
    }

    async fn call_chapter(
        &self,
        operation: &'static str,
        prompt: String,
    ) -> Result<OutlineEntry, GenerationFailed> {
        let request = GenerationRequest::structured(prompt, prompt::single_chapter_schema());
        let raw = self.call(operation, request).await?;

        parse_chapter(&raw).map_err(|e| {
            tracing::error!(operation, error = %e, "Structured response rejected");
            GenerationFailed { operation }
        })
    }

    // ========== 大纲 ==========

    pub async fn generate_outline(
        &self,
        context: &str,
        chapter_count: u32,
    ) -> Result<Vec<OutlineEntry>, GenerationFailed> {
        self.call_outline(
            "generate_outline",
            prompt::outline_prompt(context, chapter_count),
            chapter_count as usize,
        )
        .await
    }

    pub async fn generate_more_chapters(
        &self,
        context: &str,
        chapter_count: u32,
        existing: &[OutlineEntry],
    ) -> Result<Vec<OutlineEntry>, GenerationFailed> {
        self.call_outline(
            "generate_more_chapters",
            prompt::more_chapters_prompt(context, chapter_count, existing),
            chapter_count as usize,
        )
        .await
    }

    /// 重新生成单章
    ///
    /// # Panics
    /// `index` 越界时 panic
    pub async fn regenerate_chapter(
        &self,
        context: &str,
        outline: &[OutlineEntry],
        index: usize,
    ) -> Result<OutlineEntry, GenerationFailed> {
        self.call_chapter(
            "regenerate_chapter",
            prompt::regenerate_chapter_prompt(context, outline, index),
        )
        .await
    }

    /// 节拍建议，返回去除首尾空白的纯文本
    ///
    /// # Panics
    /// `index` 越界时 panic
    pub async fn suggest_beat(
        &self,
        context: &str,
        outline: &[OutlineEntry],
        index: usize,
    ) -> Result<String, GenerationFailed> {
        let text = self
            .call_text("suggest_beat", prompt::suggest_beat_prompt(context, outline, index))
            .await?;
        Ok(text.trim().to_string())
    }

    pub async fn generate_opening_outline(
        &self,
        context: &str,
    ) -> Result<Vec<OutlineEntry>, GenerationFailed> {
        self.call_outline(
            "generate_opening_outline",
            prompt::opening_outline_prompt(context),
            OPENING_CHAPTERS,
        )
        .await
    }

    // ========== 辅助设定 ==========

    pub async fn generate_synopsis(&self, context: &str) -> Result<String, GenerationFailed> {
        self.call_text("generate_synopsis", prompt::synopsis_prompt(context))
            .await
    }

    pub async fn generate_story_hook(&self, context: &str) -> Result<String, GenerationFailed> {
        self.call_text("generate_story_hook", prompt::story_hook_prompt(context))
            .await
    }

    pub async fn generate_golden_finger(&self, context: &str) -> Result<String, GenerationFailed> {
        self.call_text("generate_golden_finger", prompt::golden_finger_prompt(context))
            .await
    }

    pub async fn generate_core_setting(&self, context: &str) -> Result<String, GenerationFailed> {
        self.call_text("generate_core_setting", prompt::core_setting_prompt(context))
            .await
    }

    pub async fn generate_character_profiles(
        &self,
        context: &str,
    ) -> Result<String, GenerationFailed> {
        self.call_text(
            "generate_character_profiles",
            prompt::character_profiles_prompt(context),
        )
        .await
    }

    pub async fn generate_full_worldview(
        &self,
        context: &str,
        synopsis: &str,
    ) -> Result<String, GenerationFailed> {
        self.call_text(
            "generate_full_worldview",
            prompt::full_worldview_prompt(context, synopsis),
        )
        .await
    }

    /// 按类型分派辅助设定生成
    ///
    /// `synopsis` 仅完整世界观使用；章节正文需走 [`Self::generate_chapter_content`]
    pub async fn generate_asset(
        &self,
        kind: AssetKind,
        context: &str,
        synopsis: &str,
    ) -> Result<String, GenerationFailed> {
        match kind {
            AssetKind::Synopsis => self.generate_synopsis(context).await,
            AssetKind::StoryHook => self.generate_story_hook(context).await,
            AssetKind::GoldenFinger => self.generate_golden_finger(context).await,
            AssetKind::CoreSetting => self.generate_core_setting(context).await,
            AssetKind::CharacterProfiles => self.generate_character_profiles(context).await,
            AssetKind::FullWorldview => self.generate_full_worldview(context, synopsis).await,
            AssetKind::Chapter => {
                tracing::error!("Chapter body requested through auxiliary dispatch");
                Err(GenerationFailed {
                    operation: "generate_asset",
                })
            }
        }
    }

    // ========== 章节正文 ==========

    pub async fn generate_chapter_content(
        &self,
        full_context: &str,
        title: &str,
        beat: &str,
        style: &Choice<AuthorStyle>,
    ) -> Result<String, GenerationFailed> {
        let request = GenerationRequest::text(prompt::chapter_prompt(title, beat))
            .with_system_instruction(prompt::chapter_system_instruction(full_context, style))
            .with_temperature(self.temperature)
            .with_tier(ModelTier::Advanced);
        self.call("generate_chapter_content", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录请求并返回预设结果的引擎
    struct RecordingEngine {
        response: Result<String, String>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl RecordingEngine {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(error.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> GenerationRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GenerationEnginePort for RecordingEngine {
        async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
            self.requests.lock().unwrap().push(request);
            self.response
                .clone()
                .map_err(GenerationError::ServiceError)
        }
    }

    fn outline_json(n: usize) -> String {
        let items: Vec<_> = (1..=n)
            .map(|i| serde_json::json!({ "title": format!("第{}章", i), "beat": format!("节拍{}", i) }))
            .collect();
        serde_json::json!({ "outline": items }).to_string()
    }

    #[tokio::test]
    async fn test_generate_outline_returns_entries_in_order() {
        let engine = RecordingEngine::ok(&outline_json(15));
        let client = GenerationClient::with_default_temperature(engine.clone());

        let entries = client.generate_outline("CTX", 15).await.unwrap();

        assert_eq!(entries.len(), 15);
        assert_eq!(entries[0].title, "第1章");
        assert_eq!(entries[14].beat, "节拍15");

        let request = engine.last_request();
        assert!(request.is_structured());
        assert_eq!(request.temperature, None);
        assert_eq!(request.tier, ModelTier::Standard);
        assert!(request.prompt.contains("前 15 章"));
    }

    #[tokio::test]
    async fn test_missing_outline_field_fails() {
        let client = GenerationClient::with_default_temperature(RecordingEngine::ok(r#"{"chapters":[]}"#));
        let err = client.generate_outline("CTX", 3).await.unwrap_err();
        assert_eq!(err.operation, "generate_outline");
    }

    #[tokio::test]
    async fn test_non_array_outline_fails() {
        let client = GenerationClient::with_default_temperature(RecordingEngine::ok(r#"{"outline":"三章"}"#));
        assert!(client.generate_outline("CTX", 3).await.is_err());
    }

    #[tokio::test]
    async fn test_entry_missing_beat_fails() {
        let client = GenerationClient::with_default_temperature(RecordingEngine::ok(
            r#"{"outline":[{"title":"只有标题"}]}"#,
        ));
        assert!(client.generate_opening_outline("CTX").await.is_err());
    }

    #[tokio::test]
    async fn test_transport_error_becomes_generation_failed() {
        let client = GenerationClient::with_default_temperature(RecordingEngine::failing("HTTP 500"));
        let err = client.generate_synopsis("CTX").await.unwrap_err();
        assert_eq!(err.operation, "generate_synopsis");
        assert!(!err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_regenerate_chapter_parses_single_object() {
        let engine = RecordingEngine::ok(r#"{"title":"逆转","beat":"中点"}"#);
        let client = GenerationClient::with_default_temperature(engine.clone());
        let outline = vec![OutlineEntry::new("a", "b"), OutlineEntry::new("c", "d")];

        let entry = client.regenerate_chapter("CTX", &outline, 1).await.unwrap();

        assert_eq!(entry, OutlineEntry::new("逆转", "中点"));
        assert_eq!(
            engine.last_request().response_schema,
            Some(prompt::single_chapter_schema())
        );
    }

    #[tokio::test]
    async fn test_suggest_beat_is_trimmed_plain_text() {
        let engine = RecordingEngine::ok("\n  主角被迫在师门与家族之间做出选择。 \n");
        let client = GenerationClient::with_default_temperature(engine.clone());
        let outline = vec![OutlineEntry::new("a", "b")];

        let beat = client.suggest_beat("CTX", &outline, 0).await.unwrap();

        assert_eq!(beat, "主角被迫在师门与家族之间做出选择。");
        assert!(!engine.last_request().is_structured());
        assert_eq!(engine.last_request().temperature, Some(DEFAULT_TEMPERATURE));
    }

    #[tokio::test]
    async fn test_chapter_content_uses_advanced_tier_and_style() {
        let engine = RecordingEngine::ok("正文");
        let client = GenerationClient::new(engine.clone(), 0.9);

        let text = client
            .generate_chapter_content("FULL", "陨星之夜", "激励事件", &Choice::Custom("冷峻白描".to_string()))
            .await
            .unwrap();

        assert_eq!(text, "正文");
        let request = engine.last_request();
        assert_eq!(request.tier, ModelTier::Advanced);
        assert_eq!(request.temperature, Some(0.9));
        assert!(request.system_instruction.unwrap().contains("**冷峻白描**"));
        assert!(request.prompt.contains("陨星之夜"));
    }

    #[tokio::test]
    async fn test_full_worldview_folds_synopsis() {
        let engine = RecordingEngine::ok("世界观");
        let client = GenerationClient::with_default_temperature(engine.clone());

        client
            .generate_asset(AssetKind::FullWorldview, "CTX", "吞星证道")
            .await
            .unwrap();
        assert!(engine.last_request().prompt.contains("吞星证道"));
    }

    #[tokio::test]
    async fn test_chapter_kind_rejected_by_asset_dispatch() {
        let engine = RecordingEngine::ok("x");
        let client = GenerationClient::with_default_temperature(engine.clone());
        assert!(client.generate_asset(AssetKind::Chapter, "CTX", "").await.is_err());
        assert!(engine.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_parse_outline_accepts_fenced_json() {
        let raw = format!("```json\n{}\n```", outline_json(2));
        assert_eq!(parse_outline(&raw).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_outline_rejects_empty_list() {
        assert!(parse_outline(r#"{"outline":[]}"#).is_err());
    }

    #[test]
    fn test_parse_chapter_rejects_null_title() {
        assert!(parse_chapter(r#"{"title":null,"beat":"x"}"#).is_err());
        assert_eq!(
            parse_chapter(r#"{"title":"","beat":""}"#).unwrap(),
            OutlineEntry::new("", "")
        );
    }
}
