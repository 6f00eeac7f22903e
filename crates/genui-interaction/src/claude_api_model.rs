//! ClaudeApiModel - streaming client for the Claude Messages API.
//!
//! Configuration priority: ~/.config/genui/secret.json > environment variables

use crate::http::{is_retryable_status, parse_retry_after};
use crate::model::{ChunkStream, GenerationRequest, ModelClient, ModelError};
use crate::sse::sse_data;
use async_trait::async_trait;
use futures::StreamExt;
use genui_core::config::SecretConfig;
use genui_core::session::{WireMessage, WireRole};
use genui_infrastructure::storage::SecretStorage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Model client that streams from the Claude HTTP API.
#[derive(Clone)]
pub struct ClaudeApiModel {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    label: String,
}

impl ClaudeApiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            label: format!("claude:{model}"),
            model,
            base_url: BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Builds a client from loaded secrets, falling back to environment
    /// variables.
    ///
    /// Priority:
    /// 1. `claude` section of secret.json
    /// 2. Environment variables (ANTHROPIC_API_KEY, CLAUDE_MODEL_NAME)
    ///
    /// Model name defaults to `claude-sonnet-4-20250514` if not specified.
    pub fn from_secrets(secrets: &SecretConfig) -> Result<Self, ModelError> {
        if let Some(claude) = secrets.claude.as_ref().filter(|c| !c.api_key.is_empty()) {
            let model = claude
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string());
            return Ok(Self::new(claude.api_key.clone(), model));
        }

        let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
            ModelError::config(
                "ANTHROPIC_API_KEY not found in ~/.config/genui/secret.json or environment variables",
            )
        })?;

        let model = env::var("CLAUDE_MODEL_NAME").unwrap_or_else(|_| DEFAULT_CLAUDE_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Loads secret.json from the default location, then falls back to
    /// environment variables.
    pub fn try_from_env() -> Result<Self, ModelError> {
        let secrets = SecretStorage::new()
            .and_then(|storage| storage.load())
            .unwrap_or_default();
        Self::from_secrets(&secrets)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.label = format!("claude:{}", self.model);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_request(&self, request: &GenerationRequest) -> CreateMessageRequest {
        let (system, messages) = split_system(&request.messages);
        CreateMessageRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            system,
            stream: true,
        }
    }
}

#[async_trait]
impl ModelClient for ClaudeApiModel {
    fn name(&self) -> &str {
        &self.label
    }

    async fn stream(&self, request: GenerationRequest) -> Result<ChunkStream, ModelError> {
        let body = self.build_request(&request);
        tracing::debug!(model = %self.model, messages = body.messages.len(), "claude request");

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| ModelError::Request {
                status_code: None,
                message: format!("Claude API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Claude error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let chunks = sse_data(response.bytes_stream())
            .filter_map(|data| async move {
                match data {
                    Ok(data) => parse_stream_event(&data),
                    Err(err) => Some(Err(err)),
                }
            })
            .boxed();

        Ok(chunks)
    }
}

/// System messages go into the top-level `system` field; the rest keep
/// their order.
fn split_system(messages: &[WireMessage]) -> (Option<String>, Vec<Message>) {
    let mut system: Vec<&str> = Vec::new();
    let mut rest = Vec::with_capacity(messages.len());
    for message in messages {
        match message.role {
            WireRole::System => system.push(&message.content),
            WireRole::User | WireRole::Assistant => rest.push(Message {
                role: message.role.as_str(),
                content: message.content.clone(),
            }),
        }
    }
    let system = (!system.is_empty()).then(|| system.join("\n\n"));
    (system, rest)
}

#[derive(Serialize)]
struct CreateMessageRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    delta: Option<StreamDelta>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct StreamDelta {
    #[serde(rename = "type", default)]
    delta_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    error_type: String,
    message: String,
}

impl ErrorBody {
    /// `"<type>: <message>"`, or just the message when the type is absent.
    fn describe(self) -> String {
        if self.error_type.is_empty() {
            self.message
        } else {
            format!("{}: {}", self.error_type, self.message)
        }
    }
}

/// Text deltas become chunks, `error` events end the stream, everything
/// else (message_start, ping, content_block_stop, ...) is skipped.
fn parse_stream_event(data: &str) -> Option<Result<String, ModelError>> {
    let event: StreamEvent = match serde_json::from_str(data) {
        Ok(event) => event,
        Err(err) => {
            return Some(Err(ModelError::stream(format!(
                "Failed to parse Claude stream event: {err}"
            ))));
        }
    };

    match event.event_type.as_str() {
        "content_block_delta" => event.delta.and_then(|delta| {
            match delta.delta_type.as_deref() {
                Some("text_delta") => delta.text.map(Ok),
                _ => None,
            }
        }),
        "error" => Some(Err(ModelError::stream(
            event
                .error
                .map(ErrorBody::describe)
                .unwrap_or_else(|| "Claude stream reported an error".to_string()),
        ))),
        _ => None,
    }
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> ModelError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.describe())
        .unwrap_or_else(|_| body.clone());

    ModelError::Request {
        status_code: Some(status.as_u16()),
        message,
        is_retryable: is_retryable_status(status),
        retry_after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_delta_becomes_chunk() {
        let data = r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"{\"scr"}}"#;
        assert_eq!(parse_stream_event(data), Some(Ok("{\"scr".to_string())));
    }

    #[test]
    fn test_bookkeeping_events_are_skipped() {
        for data in [
            r#"{"type":"message_start","message":{"id":"m1"}}"#,
            r#"{"type":"ping"}"#,
            r#"{"type":"content_block_delta","delta":{"type":"input_json_delta","partial_json":"{"}}"#,
            r#"{"type":"message_stop"}"#,
        ] {
            assert_eq!(parse_stream_event(data), None, "{data}");
        }
    }

    #[test]
    fn test_error_event() {
        let data = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(
            parse_stream_event(data),
            Some(Err(ModelError::Stream("overloaded_error: Overloaded".to_string())))
        );
    }

    #[test]
    fn test_system_is_hoisted() {
        let messages = vec![
            WireMessage::new(WireRole::System, "protocol"),
            WireMessage::new(WireRole::User, "hi"),
            WireMessage::new(WireRole::Assistant, "{}"),
        ];
        let (system, rest) = split_system(&messages);

        assert_eq!(system.as_deref(), Some("protocol"));
        let roles: Vec<_> = rest.iter().map(|m| m.role).collect();
        assert_eq!(roles, ["user", "assistant"]);
    }

    #[test]
    fn test_http_error_mapping() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"Too many"}}"#;
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            body.to_string(),
            Some(Duration::from_secs(2)),
        );
        assert!(err.is_retryable());
        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
        assert_eq!(err.to_string(), "Request failed: rate_limit_error: Too many");

        let untyped = r#"{"error":{"message":"Bad key"}}"#;
        let err = map_http_error(StatusCode::UNAUTHORIZED, untyped.to_string(), None);
        assert_eq!(err.to_string(), "Request failed: Bad key");

        let err = map_http_error(StatusCode::BAD_REQUEST, "plain".to_string(), None);
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Request failed: plain");
    }
}
