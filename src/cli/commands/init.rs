//! `lockbox init`: create a new, empty vault.

use crate::cli::output;
use crate::cli::{prompt_new_password, vault_store, Cli};
use crate::config::Settings;
use crate::errors::{LockboxError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let settings = Settings::load_default()?;
    let store = vault_store(cli, &settings);

    if store.exists() && !force {
        output::tip("Use `lockbox init --force` to replace it with an empty vault.");
        return Err(LockboxError::CommandFailed(format!(
            "a vault already exists at {}",
            store.path().display()
        )));
    }

    let password = prompt_new_password(settings.min_master_password_length())?;
    store.create_new(&password)?;

    output::success(&format!("Vault created at {}", store.path().display()));
    output::info("The master password cannot be recovered. Keep it safe.");
    output::tip("Run `lockbox add --title <TITLE>` to add your first entry.");

    Ok(())
}
