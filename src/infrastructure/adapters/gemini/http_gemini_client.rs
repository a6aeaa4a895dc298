//! HTTP Gemini Client - 调用 Gemini generateContent 接口
//!
//! 实现 GenerationEnginePort trait
//!
//! 外部 API:
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: {"contents": [...], "systemInstruction": {...}, "generationConfig": {...}}
//! Response: {"candidates": [{"content": {"parts": [{"text": "..."}]}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{
    GenerationEnginePort, GenerationError, GenerationRequest, ModelTier,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiTextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Debug, Default, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

impl GeminiGenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.response_schema.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

impl From<GenerationRequest> for GeminiRequest {
    fn from(request: GenerationRequest) -> Self {
        let structured = request.is_structured();
        let generation_config = GeminiGenerationConfig {
            temperature: request.temperature,
            response_mime_type: structured.then_some(JSON_MIME_TYPE),
            response_schema: request.response_schema,
        };

        Self {
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiTextPart {
                    text: request.prompt,
                }],
            }],
            system_instruction: request.system_instruction.map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiTextPart { text }],
            }),
            generation_config: (!generation_config.is_empty()).then_some(generation_config),
        }
    }
}

/// 拼接首个候选的全部文本片段
fn extract_text(response: GeminiResponse) -> Result<String, GenerationError> {
    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| GenerationError::InvalidResponse("No candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "Candidate contains no text".to_string(),
        ));
    }
    Ok(text)
}

// ============================================================================
// Client
// ============================================================================

/// HTTP Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct HttpGeminiClientConfig {
    /// API 基础 URL
    pub base_url: String,
    pub api_key: String,
    /// 标准模型（大纲、设定）
    pub standard_model: String,
    /// 高级模型（章节正文）
    pub advanced_model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpGeminiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            standard_model: "gemini-2.5-flash".to_string(),
            advanced_model: "gemini-2.5-pro".to_string(),
            timeout_secs: 300,
        }
    }
}

impl HttpGeminiClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_models(
        mut self,
        standard_model: impl Into<String>,
        advanced_model: impl Into<String>,
    ) -> Self {
        self.standard_model = standard_model.into();
        self.advanced_model = advanced_model.into();
        self
    }
}

/// HTTP Gemini 客户端
pub struct HttpGeminiClient {
    client: Client,
    config: HttpGeminiClientConfig,
}

impl HttpGeminiClient {
    pub fn new(config: HttpGeminiClientConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn model(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.config.standard_model,
            ModelTier::Advanced => &self.config.advanced_model,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    fn model_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl GenerationEnginePort for HttpGeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let model = self.model(request.tier).to_string();
        let url = self.generate_url(&model);
        let structured = request.is_structured();
        let body = GeminiRequest::from(request);

        tracing::debug!(
            model = %model,
            structured = structured,
            prompt_len = body.contents[0].parts[0].text.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else if e.is_connect() {
                    GenerationError::NetworkError(format!(
                        "Cannot connect to generation service: {}",
                        e
                    ))
                } else {
                    GenerationError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("Malformed body: {}", e)))?;
        let text = extract_text(payload)?;

        tracing::info!(
            model = %model,
            response_len = text.len(),
            "Generation completed"
        );

        Ok(text)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.model_url(&self.config.standard_model))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> HttpGeminiClient {
        let config = HttpGeminiClientConfig::new(server.url(), "test-key")
            .with_models("flash", "pro")
            .with_timeout(5);
        HttpGeminiClient::new(config).unwrap()
    }

    fn candidate_body(parts: &[&str]) -> String {
        let parts: Vec<Value> = parts.iter().map(|t| json!({ "text": t })).collect();
        json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] }).to_string()
    }

    #[test]
    fn test_config_default() {
        let config = HttpGeminiClientConfig::default();
        assert_eq!(config.standard_model, "gemini-2.5-flash");
        assert_eq!(config.advanced_model, "gemini-2.5-pro");
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn test_request_body_for_structured_call() {
        let request =
            GenerationRequest::structured("写大纲", json!({ "type": "OBJECT" }));
        let body = serde_json::to_value(GeminiRequest::from(request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "写大纲");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(body["generationConfig"].get("temperature").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_request_body_for_plain_call() {
        let body = serde_json::to_value(GeminiRequest::from(GenerationRequest::text("梗概")))
            .unwrap();
        assert!(body.get("generationConfig").is_none());

        let request = GenerationRequest::text("写正文")
            .with_system_instruction("你是作家")
            .with_temperature(0.7);
        let body = serde_json::to_value(GeminiRequest::from(request)).unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "你是作家");
        assert!(body["systemInstruction"].get("role").is_none());
        assert!(body["generationConfig"].get("responseMimeType").is_none());
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_generate_concatenates_parts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "一句话梗概" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(candidate_body(&["少年", "逆天改命"]))
            .create_async()
            .await;

        let client = client_for(&server);
        let text = client
            .generate(GenerationRequest::text("一句话梗概"))
            .await
            .unwrap();

        assert_eq!(text, "少年逆天改命");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_advanced_tier_uses_advanced_model() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/pro:generateContent")
            .with_status(200)
            .with_body(candidate_body(&["正文"]))
            .create_async()
            .await;

        let client = client_for(&server);
        let text = client
            .generate(GenerationRequest::text("写第一章").with_tier(ModelTier::Advanced))
            .await
            .unwrap();

        assert_eq!(text, "正文");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_maps_to_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/flash:generateContent")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.generate(GenerationRequest::text("x")).await;

        match result {
            Err(GenerationError::ServiceError(msg)) => assert!(msg.contains("500")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_candidates_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/flash:generateContent")
            .with_status(200)
            .with_body(json!({ "candidates": [] }).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.generate(GenerationRequest::text("x")).await;
        assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let config = HttpGeminiClientConfig::new("http://127.0.0.1:1", "k").with_timeout(2);
        let client = HttpGeminiClient::new(config).unwrap();

        let result = client.generate(GenerationRequest::text("x")).await;
        assert!(matches!(
            result,
            Err(GenerationError::NetworkError(_)) | Err(GenerationError::Timeout)
        ));
        assert!(!client.health_check().await);
    }
}
