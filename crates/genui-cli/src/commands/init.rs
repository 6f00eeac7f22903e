use anyhow::Result;
use genui_core::config::AppConfig;
use genui_infrastructure::{ConfigStorage, GenUiPaths};

pub fn run() -> Result<()> {
    let config_storage = ConfigStorage::new()?;
    if config_storage.path().exists() {
        println!("Config exists: {}", config_storage.path().display());
    } else {
        config_storage.save(&AppConfig::default())?;
        println!("Wrote {}", config_storage.path().display());
    }

    let secret_path = GenUiPaths::ensure_secret_file()?;
    println!("Secrets: {} (fill in api_key)", secret_path.display());
    Ok(())
}
