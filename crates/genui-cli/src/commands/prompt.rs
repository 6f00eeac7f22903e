use super::utils::load_config;
use anyhow::Result;
use genui_infrastructure::resolve_system_prompt;

pub fn run() -> Result<()> {
    let config = load_config()?;
    print!("{}", resolve_system_prompt(&config.session)?);
    Ok(())
}
