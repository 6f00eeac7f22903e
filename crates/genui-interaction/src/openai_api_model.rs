//! OpenAiApiModel - streaming client for the OpenAI Chat Completions API.
//!
//! Works with any server that speaks the same protocol; point `base_url` at
//! it. Configuration priority: ~/.config/genui/secret.json > environment
//! variables

use crate::http::{is_retryable_status, parse_retry_after};
use crate::model::{ChunkStream, GenerationRequest, ModelClient, ModelError};
use crate::sse::sse_data;
use async_trait::async_trait;
use futures::StreamExt;
use genui_core::config::SecretConfig;
use genui_core::session::WireMessage;
use genui_infrastructure::storage::SecretStorage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DONE_MARKER: &str = "[DONE]";

/// Model client that streams from an OpenAI-compatible HTTP API.
#[derive(Clone)]
pub struct OpenAiApiModel {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
    label: String,
}

impl OpenAiApiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            label: format!("openai:{model}"),
            model,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_tokens: None,
        }
    }

    /// Builds a client from loaded secrets, falling back to environment
    /// variables.
    ///
    /// Priority:
    /// 1. `openai` section of secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// Model name defaults to `gpt-4o` if not specified.
    pub fn from_secrets(secrets: &SecretConfig) -> Result<Self, ModelError> {
        if let Some(openai) = secrets.openai.as_ref().filter(|c| !c.api_key.is_empty()) {
            let model = openai
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());
            return Ok(Self::new(openai.api_key.clone(), model));
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            ModelError::config(
                "OPENAI_API_KEY not found in ~/.config/genui/secret.json or environment variables",
            )
        })?;

        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into());
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
        self.label = format!("openai:{}", self.model);
        self
    }

    /// API root such as `http://localhost:11434/v1`; `/chat/completions` is
    /// appended.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(ChatMessage::from).collect(),
            max_tokens: request.max_tokens.or(self.max_tokens),
            stream: true,
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiApiModel {
    fn name(&self) -> &str {
        &self.label
    }

    async fn stream(&self, request: GenerationRequest) -> Result<ChunkStream, ModelError> {
        let body = self.build_request(&request);
        tracing::debug!(model = %self.model, messages = body.messages.len(), "openai request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ModelError::Request {
                status_code: None,
                message: format!("OpenAI API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let chunks = sse_data(response.bytes_stream())
            .take_while(|data| {
                let done = matches!(data, Ok(d) if d.trim() == DONE_MARKER);
                futures::future::ready(!done)
            })
            .filter_map(|data| async move {
                match data {
                    Ok(data) => parse_stream_chunk(&data),
                    Err(err) => Some(Err(err)),
                }
            })
            .boxed();

        Ok(chunks)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl From<&WireMessage> for ChatMessage {
    fn from(message: &WireMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Deserialize, Default)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// `choices[0].delta.content` becomes a chunk; role-only and empty deltas
/// are skipped.
fn parse_stream_chunk(data: &str) -> Option<Result<String, ModelError>> {
    let chunk: ChatCompletionChunk = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(err) => {
            return Some(Err(ModelError::stream(format!(
                "Failed to parse OpenAI stream chunk: {err}"
            ))));
        }
    };

    if let Some(error) = chunk.error {
        return Some(Err(ModelError::stream(error.message)));
    }

    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(Ok)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> ModelError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());

    ModelError::Request {
        status_code: Some(status.as_u16()),
        message,
        is_retryable: is_retryable_status(status),
        retry_after,
    }
}
