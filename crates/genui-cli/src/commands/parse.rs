use super::utils::read_input;
use anyhow::{Context, Result};
use genui_core::parser::parse_generation;
use std::path::Path;

pub fn run(file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    let (screen, report) = parse_generation(&input).context("Input is not a valid screen")?;

    for dropped in &report.dropped {
        eprintln!(
            "dropped {} ({}): {}",
            dropped.path,
            dropped.block_type.as_deref().unwrap_or("?"),
            dropped.reason
        );
    }
    println!("{}", serde_json::to_string_pretty(&screen.to_json())?);
    Ok(())
}
