//! Path management for genui configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/genui/             # Config directory ($GENUI_CONFIG_DIR overrides)
//! ├── config.toml              # Provider, model and session settings
//! └── secret.json              # API keys
//! ```

use genui_core::config::{ClaudeConfig, OpenAIConfig, SecretConfig};
use std::path::{Path, PathBuf};

/// Environment variable that replaces the config directory.
pub const CONFIG_DIR_ENV: &str = "GENUI_CONFIG_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct GenUiPaths;

impl GenUiPaths {
    /// `$GENUI_CONFIG_DIR` when set and non-empty, else `~/.config/genui`.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".config").join("genui"))
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Path to secret.json. Keep it at mode 600.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Ensures the secret file exists, creating a template with empty keys
    /// if it doesn't.
    pub fn ensure_secret_file() -> Result<PathBuf, std::io::Error> {
        let secret_path = Self::secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        write_secret_template(&secret_path)?;
        Ok(secret_path)
    }
}

/// Writes an empty-key template at `path` unless a file is already there.
pub(crate) fn write_secret_template(path: &Path) -> Result<(), std::io::Error> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let template_config = SecretConfig {
        claude: Some(ClaudeConfig {
            api_key: String::new(),
            model_name: Some("claude-sonnet-4-20250514".to_string()),
        }),
        openai: Some(OpenAIConfig {
            api_key: String::new(),
            model_name: Some("gpt-4o".to_string()),
        }),
    };

    let template_json = serde_json::to_string_pretty(&template_config)
        .map_err(std::io::Error::other)?;
    std::fs::write(path, template_json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    tracing::info!(path = %path.display(), "created secret.json template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_live_under_config_dir() {
        let config_dir = GenUiPaths::config_dir().unwrap();
        let config_file = GenUiPaths::config_file().unwrap();
        let secret_file = GenUiPaths::secret_file().unwrap();

        assert!(config_file.ends_with("config.toml"));
        assert!(secret_file.ends_with("secret.json"));
        assert!(config_file.starts_with(&config_dir));
        assert!(secret_file.starts_with(&config_dir));
    }

    #[test]
    fn test_secret_template_is_written_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("secret.json");

        write_secret_template(&path).unwrap();
        let template: SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(template.claude.map(|c| c.api_key), Some(String::new()));

        std::fs::write(&path, r#"{"claude":{"api_key":"kept"}}"#).unwrap();
        write_secret_template(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("kept"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
