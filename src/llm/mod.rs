//! Chat-completion client abstraction for the summarization pipeline.
//!
//! The orchestrator only sees the [`CompletionClient`] trait, so tests can substitute a stub
//! and count requests. The OpenAI-backed client issues HTTP requests directly to the
//! chat-completions endpoint and maps the service's failure modes onto [`CompletionError`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Errors surfaced by a chat-completion provider.
///
/// None of these are retried by the pipeline; a single failed request fails the
/// whole summarization run with the cause attached.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Provider rejected the request because the rate limit was exceeded.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,
    /// Account quota is exhausted; retrying will not help.
    #[error("API quota exceeded, check billing")]
    QuotaExceeded,
    /// Credentials were missing or rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Network failure or a retryable server-side error.
    #[error("Completion request failed: {0}")]
    Transient(String),
    /// Provider responded but the payload could not be interpreted.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Value triple describing one completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// System prompt framing the assistant's role.
    pub system_prompt: String,
    /// User prompt carrying the text to operate on.
    pub user_prompt: String,
    /// Response-length cap in tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling parameter.
    pub top_p: f32,
}

/// Interface implemented by chat-completion providers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue one completion request and return the response text.
    async fn complete(&self, request: ChatRequest) -> Result<String, CompletionError>;
}

/// OpenAI chat-completions client.
pub struct OpenAiChatClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiChatClient {
    /// Build a client for the hosted OpenAI API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_OPENAI_URL)
    }

    /// Build a client against an alternative endpoint (mock servers, proxies).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let http = Client::builder()
            .user_agent("videobrief/summary")
            .build()
            .expect("Failed to construct reqwest::Client for completions");
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, CompletionError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt},
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "top_p": request.top_p,
        });

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| CompletionError::Transient(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &body));
        }

        let body: ChatResponse = response.json().await.map_err(|error| {
            CompletionError::MalformedResponse(format!("failed to decode chat response: {error}"))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse("response contained no choices".into())
            })?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(CompletionError::MalformedResponse(
                "response contained empty content".into(),
            ));
        }

        Ok(trimmed.to_string())
    }
}

fn map_error_status(status: StatusCode, body: &str) -> CompletionError {
    let detail: Option<ApiErrorDetail> = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error);

    // 429 covers both throttling and exhausted quota; the body disambiguates.
    if status == StatusCode::TOO_MANY_REQUESTS {
        let quota = detail.as_ref().is_some_and(|error| {
            error.kind.as_deref() == Some("insufficient_quota")
                || error.code.as_deref() == Some("insufficient_quota")
        });
        return if quota {
            CompletionError::QuotaExceeded
        } else {
            CompletionError::RateLimited
        };
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = detail
            .and_then(|error| error.message)
            .unwrap_or_else(|| "invalid API key".to_string());
        return CompletionError::Unauthorized(message);
    }

    CompletionError::Transient(format!("provider returned {status}: {body}"))
}
