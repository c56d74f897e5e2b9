//! `lockbox generate`: print a random password.

use crate::config::Settings;
use crate::crypto::generate_password;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(len) => len,
        None => Settings::load_default()?.password_length(),
    };
    println!("{}", *generate_password(length));
    Ok(())
}
