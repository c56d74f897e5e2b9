//! `lockbox list`: display entries in a table, optionally filtered.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, query: Option<&str>) -> Result<()> {
    let session = unlock(cli)?;
    let entries = session.vault.search_entries(query.unwrap_or(""));

    if session.vault.is_empty() {
        output::info("No entries in this vault yet.");
        output::tip("Run `lockbox add --title <TITLE>` to add your first entry.");
        return Ok(());
    }

    match query {
        Some(q) if !q.is_empty() => output::info(&format!(
            "{} of {} entries match '{q}'",
            entries.len(),
            session.vault.len()
        )),
        _ => output::info(&format!("{} entries", entries.len())),
    }

    if !entries.is_empty() {
        output::print_entries_table(&entries);
    }

    Ok(())
}
