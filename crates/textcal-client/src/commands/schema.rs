//! Schema command.

use textcal_core::ExtractionFormat;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Prints the structured-output format for the configured allow-list.
pub fn print(config: &ClientConfig) -> ClientResult<()> {
    println!("{}", render(config)?);
    Ok(())
}

/// Renders the structured-output format as pretty JSON.
pub fn render(config: &ClientConfig) -> ClientResult<String> {
    let format = ExtractionFormat::new(&config.allow_list()?);
    Ok(serde_json::to_string_pretty(&format)?)
}
