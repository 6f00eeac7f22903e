//! Read-only access to `secret.json`.

use crate::paths::{GenUiPaths, write_secret_template};
use genui_core::config::SecretConfig;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SecretStorageError {
    NotFound(PathBuf),
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "secret.json parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "could not determine config directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Loads API keys from `secret.json`.
///
/// The file is plaintext JSON; keep it at mode 600. This type never writes
/// keys, only the empty template via [`SecretStorage::ensure_template`].
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = GenUiPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Fails with `NotFound` when the file is missing so callers can tell
    /// "no secrets" apart from "broken secrets".
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), "loaded secret.json");
        Ok(config)
    }

    /// Writes an empty-key template if the file does not exist yet.
    pub fn ensure_template(&self) -> Result<(), SecretStorageError> {
        write_secret_template(&self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_secret_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(
            &path,
            r#"{
                "claude": {"api_key": "sk-ant-test", "model_name": "claude-3-5-haiku"},
                "openai": {"api_key": "sk-oai-test"}
            }"#,
        )
        .unwrap();

        let config = SecretStorage::with_path(path).load().unwrap();

        let claude = config.claude.unwrap();
        assert_eq!(claude.api_key, "sk-ant-test");
        assert_eq!(claude.model_name.as_deref(), Some("claude-3-5-haiku"));
        assert_eq!(config.openai.unwrap().model_name, None);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("absent.json"));

        assert!(matches!(storage.load(), Err(SecretStorageError::NotFound(_))));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{ not json").unwrap();

        let result = SecretStorage::with_path(path).load();
        assert!(matches!(result, Err(SecretStorageError::ParseError(_))));
    }

    #[test]
    fn test_template_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        storage.ensure_template().unwrap();
        let config = storage.load().unwrap();
        assert_eq!(config.claude.unwrap().api_key, "");
    }
}
