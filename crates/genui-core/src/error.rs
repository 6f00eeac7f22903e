//! Error types for GenUI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the GenUI core.
///
/// Per-block and per-field problems in generated screens are never reported
/// through this type; the parser recovers from those locally. Only failures
/// that make a whole turn unusable end up here.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GenUiError {
    /// The generation text could not be read as JSON at all
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The JSON was readable but does not have the shape of a screen
    #[error("Invalid screen format: {0}")]
    InvalidFormat(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model invocation error reported by a transport collaborator
    #[error("Model error: {0}")]
    Model(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GenUiError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidJson error
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::InvalidJson(message.into())
    }

    /// Creates an InvalidFormat error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Model error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from reading generation text as a screen.
    ///
    /// Both "not JSON" and "JSON of the wrong shape" count: callers treat
    /// them the same way ("the model said something that is not a screen").
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::InvalidJson(_) | Self::InvalidFormat(_))
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GenUiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GenUiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GenUiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for GenUiError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for GenUiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<String> for GenUiError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, GenUiError>`.
pub type Result<T> = std::result::Result<T, GenUiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_predicate() {
        assert!(GenUiError::invalid_json("eof").is_parse_failure());
        assert!(GenUiError::invalid_format("blocks").is_parse_failure());
        assert!(!GenUiError::model("timeout").is_parse_failure());
    }

    #[test]
    fn test_json_error_becomes_serialization() {
        let err: GenUiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }
}
