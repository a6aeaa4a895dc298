//! Fake Generation Client - 用于测试和离线运行的生成客户端
//!
//! 按脚本顺序返回预设结果；脚本耗尽后返回固定的占位内容，不实际调用生成服务

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{GenerationEnginePort, GenerationError, GenerationRequest};
use crate::domain::prompt::OUTLINE_FIELD;

/// 脚本耗尽后结构化请求返回的章节数
const DEFAULT_OUTLINE_CHAPTERS: usize = 3;

/// Fake Generation Client
pub struct FakeGenerationClient {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    latency: Duration,
}

impl FakeGenerationClient {
    pub fn new() -> Self {
        tracing::info!("FakeGenerationClient initialized");
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
        }
    }

    /// 模拟请求耗时
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 追加一条成功响应
    pub fn push_response(&self, text: impl Into<String>) {
        self.push(Ok(text.into()));
    }

    /// 追加一条失败响应
    pub fn push_error(&self, error: GenerationError) {
        self.push(Err(error));
    }

    fn push(&self, result: Result<String, GenerationError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(result);
        }
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn fallback(request: &GenerationRequest) -> String {
        let chapter = |i: usize| json!({ "title": format!("第{}章", i), "beat": format!("第{}章的节拍", i) });

        match &request.response_schema {
            Some(schema) if schema["properties"].get(OUTLINE_FIELD).is_some() => {
                let outline: Vec<_> = (1..=DEFAULT_OUTLINE_CHAPTERS).map(chapter).collect();
                json!({ (OUTLINE_FIELD): outline }).to_string()
            }
            Some(_) => chapter(1).to_string(),
            None => format!("（示例内容）{}", request.prompt.chars().take(20).collect::<String>()),
        }
    }
}

impl Default for FakeGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationEnginePort for FakeGenerationClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        tracing::debug!(
            prompt_len = request.prompt.len(),
            structured = request.is_structured(),
            "FakeGenerationClient: returning scripted response"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let result = scripted.unwrap_or_else(|| Ok(Self::fallback(&request)));

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_is_consumed_in_order() {
        let client = FakeGenerationClient::new();
        client.push_response("first");
        client.push_error(GenerationError::Timeout);

        assert_eq!(
            client.generate(GenerationRequest::text("a")).await.unwrap(),
            "first"
        );
        assert!(matches!(
            client.generate(GenerationRequest::text("b")).await,
            Err(GenerationError::Timeout)
        ));
        assert_eq!(client.request_count(), 2);
        assert_eq!(client.requests()[1].prompt, "b");
    }

    #[tokio::test]
    async fn test_fallback_matches_requested_schema() {
        use crate::application::generation_client::{parse_chapter, parse_outline};
        use crate::domain::prompt::{outline_schema, single_chapter_schema};

        let client = FakeGenerationClient::new();
        let raw = client
            .generate(GenerationRequest::structured("x", outline_schema()))
            .await
            .unwrap();
        assert_eq!(parse_outline(&raw).unwrap().len(), DEFAULT_OUTLINE_CHAPTERS);

        let raw = client
            .generate(GenerationRequest::structured("x", single_chapter_schema()))
            .await
            .unwrap();
        assert_eq!(parse_chapter(&raw).unwrap().title, "第1章");

        let text = client.generate(GenerationRequest::text("写一段")).await.unwrap();
        assert!(text.starts_with("（示例内容）"));
    }
}
