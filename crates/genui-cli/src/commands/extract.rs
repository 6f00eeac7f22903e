use super::utils::read_input;
use anyhow::Result;
use genui_core::extract::find_json;
use std::path::Path;

/// Prints the JSON candidate found in the input. Exits with an error when
/// there is neither a fenced block nor a balanced object.
pub fn run(file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    match find_json(&input) {
        Some(json) => {
            println!("{}", json);
            Ok(())
        }
        None => anyhow::bail!("No JSON object or fenced block found in input"),
    }
}
