//! `lockbox add`: add a credential entry to the vault.

use crate::cli::output;
use crate::cli::{read_secret_input, unlock, Cli};
use crate::crypto::generate_password;
use crate::errors::{LockboxError, Result};
use crate::vault::{Entry, EntryFields};

/// Arguments of the `add` command.
pub struct AddArgs<'a> {
    pub title: &'a str,
    pub username: &'a str,
    pub url: &'a str,
    pub notes: &'a str,
    pub generate: bool,
    pub length: Option<usize>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: AddArgs<'_>) -> Result<()> {
    if args.title.trim().is_empty() {
        return Err(LockboxError::CommandFailed("title cannot be empty".into()));
    }

    let mut session = unlock(cli)?;

    let password = if args.generate {
        generate_password(args.length.unwrap_or(session.settings.password_length()))
    } else {
        read_secret_input(&format!("Password for {}", args.title))?
    };

    let entry = Entry::new(EntryFields {
        title: args.title.to_string(),
        username: args.username.to_string(),
        password: password.to_string(),
        url: args.url.to_string(),
        notes: args.notes.to_string(),
    });
    let id = entry.id().to_string();

    session.vault.add_entry(entry);
    session.save()?;

    output::success(&format!(
        "Added '{}' ({id}), {} entr{} total",
        args.title,
        session.vault.len(),
        if session.vault.len() == 1 { "y" } else { "ies" }
    ));
    if args.generate {
        output::tip(&format!("Run `lockbox copy {id}` to copy the generated password."));
    }

    Ok(())
}
