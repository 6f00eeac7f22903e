//! `config.toml` persistence.

use crate::paths::GenUiPaths;
use genui_core::config::AppConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigStorageError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
    SerializeError(toml::ser::Error),
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::ParseError(e) => write!(f, "config.toml parse error: {}", e),
            ConfigStorageError::SerializeError(e) => {
                write!(f, "config.toml serialize error: {}", e)
            }
            ConfigStorageError::ConfigDirNotFound => {
                write!(f, "could not determine config directory")
            }
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::ParseError(e)
    }
}

impl From<toml::ser::Error> for ConfigStorageError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigStorageError::SerializeError(e)
    }
}

pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new() -> Result<Self, ConfigStorageError> {
        let path = GenUiPaths::config_file().map_err(|_| ConfigStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or blank file yields [`AppConfig::default`].
    pub fn load(&self) -> Result<AppConfig, ConfigStorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config.toml, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        Ok(toml::from_str(&content)?)
    }

    /// Writes through a temp file in the same directory and renames it over
    /// the target, so readers never see a half-written file.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigStorageError> {
        let content = toml::to_string_pretty(config)?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("config.toml");
        let tmp_path = dir.join(format!(".{}.tmp", file_name));

        {
            let mut tmp = fs::File::create(&tmp_path)?;
            tmp.write_all(content.as_bytes())?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::info!(path = %self.path.display(), "saved config.toml");
        Ok(())
    }
}
