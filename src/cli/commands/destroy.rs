//! `lockbox destroy`: delete the vault file.

use crate::cli::output;
use crate::cli::{confirm, vault_store, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `destroy` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let settings = Settings::load_default()?;
    let store = vault_store(cli, &settings);

    if !store.exists() {
        output::info(&format!("No vault at {}", store.path().display()));
        return Ok(());
    }

    if !force
        && !confirm(&format!(
            "Permanently delete the vault at {}? All entries will be lost",
            store.path().display()
        ))?
    {
        output::info("Cancelled.");
        return Ok(());
    }

    store.delete()?;
    output::success(&format!("Deleted vault {}", store.path().display()));
    Ok(())
}
