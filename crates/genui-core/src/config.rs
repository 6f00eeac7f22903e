//! Configuration models for `config.toml` and `secret.json`.
//!
//! Only the shapes live here; reading and writing them is done by
//! `genui-infrastructure`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Which model client a session talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Claude,
    #[serde(rename = "openai", alias = "open_ai")]
    OpenAi,
    /// Replays canned responses; no network.
    Scripted,
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ModelProvider,
    /// Overrides the provider's default model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Alternative endpoint, e.g. an OpenAI-compatible local server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            model_name: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: None,
        }
    }
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File whose content replaces the built-in system prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_path: Option<PathBuf>,
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude: Option<ClaudeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAIConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaudeConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.model.provider, ModelProvider::Claude);
    }

    #[test]
    fn test_partial_model_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [model]
            provider = "openai"
            base_url = "http://localhost:11434/v1"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.provider, ModelProvider::OpenAi);
        assert_eq!(config.model.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(
            config.model.base_url.as_deref(),
            Some("http://localhost:11434/v1")
        );
    }

    #[test]
    fn test_secret_json_sections_are_optional() {
        let secrets: SecretConfig =
            serde_json::from_str(r#"{"claude": {"api_key": "sk-test"}}"#).unwrap();
        assert_eq!(secrets.claude.map(|c| c.api_key).as_deref(), Some("sk-test"));
        assert!(secrets.openai.is_none());
    }
}
