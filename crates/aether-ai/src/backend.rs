//! Chat-completion backend used by both generative stages.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::BackendError;

pub const DEFAULT_BASE_URL: &str = "https://newapi.deepwisdom.ai/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// One chat-completion call: a system persona plus a single user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A generative backend that turns a chat request into raw text.
///
/// Implementations hold no per-request state and may be shared across
/// concurrent requests.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete_chat(&self, request: &ChatRequest) -> Result<String, BackendError>;
}

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// `None` or empty means the generative path is disabled.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl BackendConfig {
    /// Build a shared client, or `None` when no API key is configured.
    pub fn connect(&self) -> Result<Option<Arc<dyn ChatBackend>>, BackendError> {
        let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            info!("no generative backend key configured; fallback formulas only");
            return Ok(None);
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = OpenAiClient::with_http(
            builder.build()?,
            key.to_string(),
            self.base_url.clone(),
            self.model.clone(),
        );
        Ok(Some(Arc::new(client)))
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// HTTP client for `POST {base_url}/chat/completions` with bearer auth.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// `base_url` should include the API version, e.g. `https://api.openai.com/v1`.
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self::with_http(reqwest::Client::new(), api_key, base_url, model)
    }

    fn with_http(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        model: String,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete_chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        info!(
            url = %url,
            model = %self.model,
            max_tokens = request.max_tokens,
            "sending chat completion"
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(BackendError::RateLimited { body });
            }
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = resp.json().await?;
        if let Some(usage) = &completion.usage {
            debug!(total_tokens = usage.total_tokens, "chat completion usage");
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(BackendError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest {
            system: "You are Aether.".into(),
            user: "Recommend a scent.".into(),
            temperature: 0.7,
            max_tokens: 1500,
        }
    }

    fn client(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new("test-key".into(), format!("{}/", server.uri()), "gpt-4o".into())
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = OpenAiClient::new("k".into(), "http://localhost:8080/v1/".into(), "m".into());
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn missing_or_blank_key_yields_no_backend() {
        assert!(BackendConfig::default().connect().unwrap().is_none());
        let blank = BackendConfig {
            api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank.connect().unwrap().is_none());
    }

    #[test]
    fn configured_key_yields_backend() {
        let config = BackendConfig {
            api_key: Some("sk-test".into()),
            timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        assert!(config.connect().unwrap().is_some());
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "max_tokens": 1500,
                "messages": [
                    {"role": "system", "content": "You are Aether."},
                    {"role": "user", "content": "Recommend a scent."}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}],
                "usage": {"total_tokens": 42}
            })))
            .mount(&server)
            .await;

        let text = client(&server).complete_chat(&request()).await.unwrap();
        assert_eq!(text, "{\"a\": 1}");
    }

    #[tokio::test]
    async fn rate_limit_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = client(&server).complete_chat(&request()).await.unwrap_err();
        assert!(matches!(err, BackendError::RateLimited { ref body } if body == "slow down"));
    }

    #[tokio::test]
    async fn server_error_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client(&server).complete_chat(&request()).await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn no_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client(&server).complete_chat(&request()).await.unwrap_err();
        assert!(matches!(err, BackendError::EmptyResponse));
    }
}
