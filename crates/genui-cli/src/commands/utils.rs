use anyhow::{Context, Result};
use genui_core::config::{AppConfig, SecretConfig};
use genui_infrastructure::{ConfigStorage, SecretStorage, SecretStorageError};
use std::io::Read;
use std::path::Path;

/// Reads `file`, or all of stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn load_config() -> Result<AppConfig> {
    let storage = ConfigStorage::new()?;
    storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.path().display()))
}

/// A missing secret.json is fine; keys may come from the environment.
pub fn load_secrets() -> Result<SecretConfig> {
    match SecretStorage::new()?.load() {
        Ok(secrets) => Ok(secrets),
        Err(SecretStorageError::NotFound(path)) => {
            tracing::debug!(path = %path.display(), "no secret.json, using environment");
            Ok(SecretConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
