//! CLI module: argument parsing, prompts and the command implementations.
//!
//! Everything here drives `VaultStore` and `Vault`; no cryptography or
//! file handling happens at this layer.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::vault::{Vault, VaultStore};

/// Environment variable holding the master password for scripted use.
pub const PASSWORD_ENV: &str = "LOCKBOX_PASSWORD";

/// Lockbox CLI: password-protected credential vault.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Password-protected vault for credentials",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vault file (default: ~/.vault/vault.enc)
    #[arg(long, global = true)]
    pub vault: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init {
        /// Replace an existing vault file
        #[arg(long)]
        force: bool,
    },

    /// Add a credential entry
    Add {
        /// Entry title (required)
        #[arg(short, long)]
        title: String,
        /// Account username
        #[arg(short, long, default_value = "")]
        username: String,
        /// Website or service URL
        #[arg(long, default_value = "")]
        url: String,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// List entries, optionally filtered by a search query
    List {
        /// Case-insensitive text matched against title, username, url and notes
        query: Option<String>,
    },

    /// Show a single entry
    Show {
        /// Entry id
        id: String,
        /// Print the password in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Edit an entry (omitted fields keep their current value)
    Edit {
        /// Entry id
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Prompt for a new password
        #[arg(short, long, conflicts_with = "generate")]
        password: bool,
        /// Replace the password with a generated one
        #[arg(short, long)]
        generate: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Copy an entry's password to the clipboard
    Copy {
        /// Entry id
        id: String,
    },

    /// Print a random password
    Generate {
        /// Password length (8-128)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Delete the vault file
    Destroy {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print the resolved vault file path
    Path,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// An unlocked vault together with what is needed to save it again.
pub struct Session {
    pub store: VaultStore,
    pub vault: Vault,
    pub settings: Settings,
    password: Zeroizing<String>,
}

impl Session {
    /// Persist the current vault state.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.vault, &self.password)
    }
}

/// Prompt for the master password and load the vault.
pub fn unlock(cli: &Cli) -> Result<Session> {
    let settings = Settings::load_default()?;
    let store = vault_store(cli, &settings);

    if !store.exists() {
        output::tip("Run `lockbox init` to create a vault.");
        return Err(LockboxError::NotFound(store.path().to_path_buf()));
    }

    let password = prompt_password()?;
    let vault = store.load(&password)?;

    Ok(Session {
        store,
        vault,
        settings,
        password,
    })
}

/// Build the store from `--vault`, falling back to the configured path.
pub fn vault_store(cli: &Cli, settings: &Settings) -> VaultStore {
    let path = cli.vault.as_deref().unwrap_or(&settings.vault_path);
    VaultStore::new(path)
}

/// Get the master password, trying in order:
/// 1. `LOCKBOX_PASSWORD` env var (scripts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `LOCKBOX_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if pw.chars().count() < min_len {
            return Err(LockboxError::CommandFailed(format!(
                "master password must be at least {min_len} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| LockboxError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Master password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

/// Read an entry password from piped stdin, or prompt for it.
pub fn read_secret_input(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        return Ok(buf);
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}
