//! Filesystem side of genui: config directory layout, `config.toml`,
//! `secret.json` and system prompt resolution.

pub mod paths;
pub mod prompt_source;
pub mod storage;

pub use paths::{GenUiPaths, PathError};
pub use prompt_source::resolve_system_prompt;
pub use storage::{ConfigStorage, ConfigStorageError, SecretStorage, SecretStorageError};
