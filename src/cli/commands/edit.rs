//! `lockbox edit`: rewrite an entry's fields.
//!
//! Fields that are not given on the command line keep their current
//! value; the password changes only with `--password` or `--generate`.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{read_secret_input, unlock, Cli};
use crate::crypto::{generate_password, secure_wipe_string};
use crate::errors::{LockboxError, Result};

/// Arguments of the `edit` command.
pub struct EditArgs<'a> {
    pub id: &'a str,
    pub title: Option<&'a str>,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub password: bool,
    pub generate: bool,
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, args: EditArgs<'_>) -> Result<()> {
    if args.title.is_some_and(|t| t.trim().is_empty()) {
        return Err(LockboxError::CommandFailed("title cannot be empty".into()));
    }

    let mut session = unlock(cli)?;
    let current = session
        .vault
        .get_entry(args.id)
        .ok_or_else(|| LockboxError::EntryNotFound(args.id.to_string()))?;

    let mut fields = Zeroizing::new(current.fields());
    if let Some(title) = args.title {
        fields.title = title.to_string();
    }
    if let Some(username) = args.username {
        fields.username = username.to_string();
    }
    if let Some(url) = args.url {
        fields.url = url.to_string();
    }
    if let Some(notes) = args.notes {
        fields.notes = notes.to_string();
    }
    let new_password = if args.generate {
        Some(generate_password(session.settings.password_length()))
    } else if args.password {
        Some(read_secret_input(&format!("New password for {}", fields.title))?)
    } else {
        None
    };
    if let Some(password) = new_password {
        secure_wipe_string(&mut fields.password);
        fields.password.push_str(&password);
    }

    if !session.vault.update_entry(args.id, std::mem::take(&mut *fields)) {
        return Err(LockboxError::EntryNotFound(args.id.to_string()));
    }
    session.save()?;

    output::success(&format!("Updated entry {}", args.id));
    Ok(())
}
