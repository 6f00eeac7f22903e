//! Model client selection from configuration.

use crate::claude_api_model::ClaudeApiModel;
use crate::model::{ModelClient, ModelError};
use crate::openai_api_model::OpenAiApiModel;
use crate::scripted_model::ScriptedModel;
use genui_core::config::{AppConfig, ModelProvider, SecretConfig};
use std::sync::Arc;

/// Builds the client named by `config.model.provider`.
///
/// API keys come from `secrets`, falling back to environment variables.
/// `model_name`, `max_tokens` and `base_url` from config.toml override the
/// provider defaults.
pub fn model_from_config(
    config: &AppConfig,
    secrets: &SecretConfig,
) -> Result<Arc<dyn ModelClient>, ModelError> {
    let settings = &config.model;

    let client: Arc<dyn ModelClient> = match settings.provider {
        ModelProvider::Claude => {
            let mut model =
                ClaudeApiModel::from_secrets(secrets)?.with_max_tokens(settings.max_tokens);
            if let Some(name) = &settings.model_name {
                model = model.with_model(name);
            }
            if let Some(url) = &settings.base_url {
                model = model.with_base_url(url);
            }
            Arc::new(model)
        }
        ModelProvider::OpenAi => {
            let mut model =
                OpenAiApiModel::from_secrets(secrets)?.with_max_tokens(settings.max_tokens);
            if let Some(name) = &settings.model_name {
                model = model.with_model(name);
            }
            if let Some(url) = &settings.base_url {
                model = model.with_base_url(url);
            }
            Arc::new(model)
        }
        ModelProvider::Scripted => Arc::new(ScriptedModel::demo()),
    };

    tracing::info!(model = client.name(), "model client ready");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use genui_core::config::{ClaudeConfig, ModelConfig, OpenAIConfig};

    fn config(provider: ModelProvider, model_name: Option<&str>) -> AppConfig {
        AppConfig {
            model: ModelConfig {
                provider,
                model_name: model_name.map(str::to_string),
                ..ModelConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_scripted_needs_no_secrets() {
        let client =
            model_from_config(&config(ModelProvider::Scripted, None), &SecretConfig::default())
                .unwrap();
        assert_eq!(client.name(), "scripted");
    }

    #[test]
    fn test_secret_json_key_and_config_model_override() {
        let secrets = SecretConfig {
            claude: Some(ClaudeConfig {
                api_key: "sk-ant".to_string(),
                model_name: Some("claude-from-secrets".to_string()),
            }),
            openai: Some(OpenAIConfig {
                api_key: "sk-oai".to_string(),
                model_name: None,
            }),
        };

        let claude = model_from_config(&config(ModelProvider::Claude, None), &secrets).unwrap();
        assert_eq!(claude.name(), "claude:claude-from-secrets");

        let openai =
            model_from_config(&config(ModelProvider::OpenAi, Some("gpt-mini")), &secrets).unwrap();
        assert_eq!(openai.name(), "openai:gpt-mini");
    }
}
