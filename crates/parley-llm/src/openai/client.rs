// OpenAI Chat Completions client

use crate::error::{LlmError, Result};
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::Message;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client (HTTP direct, no SDK)
///
/// A client without an API key is valid to construct; every call on it
/// fails with [`LlmError::MissingApiKey`] before touching the network.
pub struct OpenAIClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> OpenAIClientBuilder {
        OpenAIClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_chat_request<'a>(
        &self,
        model: &'a str,
        messages: &'a [Message],
        options: &ChatOptions,
    ) -> CompletionPayload<'a> {
        // o1 and gpt-5 models reject temperature and use max_completion_tokens
        let is_reasoning_model = model.starts_with("o1") || model.starts_with("gpt-5");

        let (max_tokens, max_completion_tokens) = if is_reasoning_model {
            (None, options.max_tokens)
        } else {
            (options.max_tokens, None)
        };

        CompletionPayload {
            model,
            messages,
            stream: false,
            temperature: options.temperature.filter(|_| !is_reasoning_model),
            max_tokens,
            max_completion_tokens,
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let payload = self.build_chat_request(&request.model, &request.messages, &request.options);

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        let raw: OpenAIChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let choice = raw.choices.into_iter().next();
        Ok(ChatResponse {
            content: choice.as_ref().and_then(|c| c.message.content.clone()),
            finish_reason: choice.and_then(|c| c.finish_reason),
            model: raw.model,
            usage: raw.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

/// Map a non-success response onto the error taxonomy
async fn error_from_response(response: reqwest::Response) -> LlmError {
    let status = response.status();
    let retry_after_secs = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            message,
            retry_after_secs,
        },
        _ => LlmError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// OpenAI wraps errors as `{"error": {"message": ...}}`; fall back to the raw body
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Default)]
pub struct OpenAIClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl OpenAIClientBuilder {
    /// Set the API key. Blank keys are treated as absent.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    pub fn maybe_api_key(self, api_key: Option<String>) -> Self {
        match api_key {
            Some(key) => self.api_key(key),
            None => self,
        }
    }

    /// Base URL for the API (defaults to https://api.openai.com/v1)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<OpenAIClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| OPENAI_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(LlmError::InvalidConfig(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(OpenAIClient {
            http_client,
            api_key: self.api_key,
            base_url,
        })
    }
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionPayload<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_for_chat_model() {
        let client = OpenAIClient::new("test-key").unwrap();
        let messages = vec![Message::user("Hello")];
        let options = ChatOptions::new().temperature(0.3).max_tokens(64);

        let payload = client.build_chat_request("gpt-4o-mini", &messages, &options);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
        assert_eq!(json["max_tokens"], 64);
        assert!(json.get("max_completion_tokens").is_none());
        assert!(json.get("temperature").is_some());
    }

    #[test]
    fn test_payload_for_reasoning_model() {
        let client = OpenAIClient::new("test-key").unwrap();
        let messages = vec![Message::user("Hello")];
        let options = ChatOptions::new().temperature(0.3).max_tokens(64);

        let payload = client.build_chat_request("o1-mini", &messages, &options);
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["max_completion_tokens"], 64);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let client = OpenAIClient::new("   ").unwrap();
        assert!(!client.has_api_key());
    }

    #[test]
    fn test_base_url_defaults_and_trims_trailing_slash() {
        let client = OpenAIClient::new("test-key").unwrap();
        assert_eq!(client.base_url(), OPENAI_API_BASE);

        let client = OpenAIClient::builder()
            .base_url("http://localhost:8080/v1/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = OpenAIClient::builder()
            .api_key("test-key")
            .base_url("api.openai.com")
            .build();
        assert!(matches!(result, Err(LlmError::InvalidConfig(_))));
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body), "Incorrect API key provided");
        assert_eq!(extract_error_message("  upstream down \n"), "upstream down");
    }
}
