//! System clipboard access for the copy action.

use arboard::Clipboard;
use thiserror::Error;
use tracing::debug;

/// Clipboard write failure. Reported to the user, never fatal.
#[derive(Debug, Error)]
#[error("failed to copy to clipboard: {0}")]
pub struct ClipboardError(String);

/// Place `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| ClipboardError(e.to_string()))?;
    debug!(bytes = text.len(), "Copied to clipboard");
    Ok(())
}
