//! `lockbox copy`: put an entry's password on the system clipboard.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let session = unlock(cli)?;
    let entry = session
        .vault
        .get_entry(id)
        .ok_or_else(|| LockboxError::EntryNotFound(id.to_string()))?;

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LockboxError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(entry.password.as_str())
        .map_err(|e| LockboxError::Clipboard(e.to_string()))?;

    output::success(&format!("Password for '{}' copied to clipboard", entry.title));
    output::warning("The clipboard is not cleared automatically.");
    Ok(())
}
