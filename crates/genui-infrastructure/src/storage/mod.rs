//! File-backed storage for configuration and secrets.

pub mod config_storage;
pub mod secret_storage;

pub use config_storage::{ConfigStorage, ConfigStorageError};
pub use secret_storage::{SecretStorage, SecretStorageError};
