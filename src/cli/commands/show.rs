//! `lockbox show`: print a single entry.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, reveal: bool) -> Result<()> {
    let session = unlock(cli)?;
    let entry = session
        .vault
        .get_entry(id)
        .ok_or_else(|| LockboxError::EntryNotFound(id.to_string()))?;

    output::print_entry(&entry, reveal);
    Ok(())
}
