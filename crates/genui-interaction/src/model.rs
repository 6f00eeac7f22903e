//! Model invocation seam.
//!
//! The engine only needs "give me the next text chunk" and "is it over".
//! Everything transport-specific (HTTP, SSE framing, auth) stays behind
//! [`ModelClient`].

use async_trait::async_trait;
use futures::Stream;
use genui_core::session::WireMessage;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Incremental generation text. Finite; ends after the last chunk or the
/// first error.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, ModelError>> + Send>>;

/// Everything a client needs to run one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Whole history in order, System message first.
    pub messages: Vec<WireMessage>,
    pub max_tokens: Option<u32>,
}

/// Failure reported by a model client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The request was rejected or never reached the provider
    #[error("Request failed: {message}")]
    Request {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The response stream broke or carried an error event
    #[error("Stream error: {0}")]
    Stream(String),

    /// Missing API key or unusable settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModelError {
    pub fn request(status_code: Option<u16>, message: impl Into<String>) -> Self {
        ModelError::Request {
            status_code,
            message: message.into(),
            is_retryable: false,
            retry_after: None,
        }
    }

    pub fn stream(message: impl Into<String>) -> Self {
        ModelError::Stream(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        ModelError::Config(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ModelError::Request { is_retryable: true, .. })
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ModelError::Request { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ModelError::Request { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        ModelError::Request {
            status_code: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            is_retryable: err.is_connect() || err.is_timeout(),
            retry_after: None,
        }
    }
}

/// A generation backend.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Short label used in logs, e.g. `claude:claude-sonnet-4-20250514`.
    fn name(&self) -> &str;

    /// Starts a generation. Errors before the first chunk are returned here;
    /// errors after it arrive through the stream.
    async fn stream(&self, request: GenerationRequest) -> Result<ChunkStream, ModelError>;
}
