//! Resolves the system prompt a session starts with.

use genui_core::config::SessionConfig;
use genui_core::prompt::system_prompt;
use std::fs;

/// The file at `system_prompt_path` when configured, else the built-in
/// protocol prompt. A configured file that can't be read or is blank is an
/// error rather than a silent fallback.
pub fn resolve_system_prompt(config: &SessionConfig) -> Result<String, std::io::Error> {
    let Some(path) = &config.system_prompt_path else {
        return Ok(system_prompt());
    };

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("system prompt file is empty: {}", path.display()),
        ));
    }
    tracing::info!(path = %path.display(), "using custom system prompt");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_prompt_without_path() {
        let prompt = resolve_system_prompt(&SessionConfig::default()).unwrap();
        assert_eq!(prompt, system_prompt());
    }

    #[test]
    fn test_file_prompt_and_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompt.md");
        let config = SessionConfig {
            system_prompt_path: Some(path.clone()),
        };

        fs::write(&path, "Only answer with screens.").unwrap();
        assert_eq!(resolve_system_prompt(&config).unwrap(), "Only answer with screens.");

        fs::write(&path, "\n").unwrap();
        assert!(resolve_system_prompt(&config).is_err());
    }
}
