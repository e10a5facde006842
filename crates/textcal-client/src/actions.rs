//! Link actions: open in the browser, copy to clipboard.

use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Opens the calendar link in the default browser.
pub fn open_link(link: &str) -> ClientResult<()> {
    info!(url = %link, "opening calendar link");
    open::that(link).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))?;
    Ok(())
}

/// Copies the calendar link to the clipboard.
pub fn copy_link(link: &str) -> ClientResult<()> {
    info!(url = %link, "copying calendar link to clipboard");

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClientError::Action(format!("failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(link)
        .map_err(|e| ClientError::Action(format!("failed to copy to clipboard: {}", e)))?;

    Ok(())
}
