//! `lockbox path`: print where the vault file lives.

use crate::cli::{vault_store, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `path` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = Settings::load_default()?;
    println!("{}", vault_store(cli, &settings).path().display());
    Ok(())
}
