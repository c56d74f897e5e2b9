//! `lockbox delete`: remove an entry from the vault.

use crate::cli::output;
use crate::cli::{confirm, unlock, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let mut session = unlock(cli)?;

    let title = session
        .vault
        .get_entry(id)
        .map(|e| e.title.clone())
        .ok_or_else(|| LockboxError::EntryNotFound(id.to_string()))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm(&format!("Delete entry '{title}' ({id})?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    if !session.vault.delete_entry(id) {
        return Err(LockboxError::EntryNotFound(id.to_string()));
    }
    session.save()?;

    output::success(&format!("Deleted entry '{title}'"));
    Ok(())
}
