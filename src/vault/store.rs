//! Persistence for vaults: path resolution, save and load.
//!
//! `VaultStore` owns nothing but the resolved file path.  Each call
//! derives the key from the password and the vault's salt, does its
//! work, and wipes the key and plaintext before returning, whether it
//! succeeded or not.  Callers own the returned `Vault` and must pass it
//! back to `save` to make changes durable.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto::{decrypt, derive_key, encrypt, generate_salt};
use crate::errors::{LockboxError, Result};

use super::format;
use super::model::Vault;

/// Directory under the home directory that holds the default vault.
pub const DEFAULT_DIR: &str = ".vault";

/// File name of the default vault.
pub const DEFAULT_FILE: &str = "vault.enc";

/// Handle on a single vault file.
#[derive(Debug, Clone)]
pub struct VaultStore {
    /// Resolved location of the vault file.
    path: PathBuf,
}

impl VaultStore {
    /// Create a store for `path`, resolved against the user's home directory.
    ///
    /// - absolute paths are used verbatim;
    /// - relative paths are joined onto the home directory;
    /// - an empty path means `~/.vault/vault.enc`, or `vault.enc` in the
    ///   working directory when there is no home directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_home(path, dirs::home_dir().as_deref())
    }

    /// Like `new`, with an explicit home directory (`None` = unknown).
    pub fn with_home(path: impl AsRef<Path>, home: Option<&Path>) -> Self {
        Self {
            path: resolve_path(path.as_ref(), home),
        }
    }

    /// Returns `true` if a file exists at the vault path.
    ///
    /// Only a definite "not found" counts as absent; a path that cannot be
    /// checked (permissions, a file where a directory should be) reports
    /// `true` so `load` surfaces the real error.
    pub fn exists(&self) -> bool {
        self.path.try_exists().unwrap_or(true)
    }

    /// Generate a salt, build an empty vault and persist it immediately.
    ///
    /// An existing file at the path is replaced; callers that care check
    /// `exists` first.
    pub fn create_new(&self, password: &str) -> Result<Vault> {
        let salt = generate_salt()?;
        let vault = Vault::new(salt);
        self.save(&vault, password)?;
        info!(path = %self.path.display(), "Vault created");
        Ok(vault)
    }

    /// Read, decrypt and parse the vault file.
    ///
    /// A wrong password and a damaged file both surface as
    /// `AuthenticationFailed`, including a payload too short to hold a
    /// nonce.
    pub fn load(&self, password: &str) -> Result<Vault> {
        debug!(path = %self.path.display(), "Loading vault");

        let data = format::read_vault_file(&self.path)?;
        let (salt, payload) = format::split_frame(&data)?;

        let key = derive_key(password, &salt);
        let plaintext = decrypt(payload, key.as_bytes()).map_err(|e| match e {
            LockboxError::InvalidFraming => LockboxError::AuthenticationFailed,
            other => other,
        })?;
        let plaintext = Zeroizing::new(plaintext);
        drop(key);

        let vault = format::decode_vault(&plaintext, salt)?;
        debug!(path = %self.path.display(), entries = vault.len(), "Vault loaded");
        Ok(vault)
    }

    /// Encrypt `vault` under `password` and replace the file on disk.
    ///
    /// The key is derived from the vault's own salt; a vault keeps its
    /// salt for life.  The directory is prepared before any crypto work.
    pub fn save(&self, vault: &Vault, password: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            format::ensure_dir(parent)?;
        }

        let plaintext = format::encode_vault(vault)?;
        let key = derive_key(password, vault.salt());
        let payload = encrypt(&plaintext, key.as_bytes())?;
        drop(key);
        drop(plaintext);

        let data = format::join_frame(vault.salt(), &payload);
        format::write_vault_file(&self.path, &data)?;

        debug!(
            path = %self.path.display(),
            entries = vault.len(),
            size = data.len(),
            "Vault saved"
        );
        Ok(())
    }

    /// Remove the vault file.  A file that is already gone is not an error.
    pub fn delete(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Vault deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LockboxError::io(
                format!("failed to delete vault file {}", self.path.display()),
                e,
            )),
        }
    }

    /// Returns the resolved path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Apply the path resolution rules described on `VaultStore::new`.
fn resolve_path(path: &Path, home: Option<&Path>) -> PathBuf {
    if path.as_os_str().is_empty() {
        return match home {
            Some(home) => home.join(DEFAULT_DIR).join(DEFAULT_FILE),
            None => absolute_from_cwd(Path::new(DEFAULT_FILE)),
        };
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match home {
        Some(home) => home.join(path),
        None => absolute_from_cwd(path),
    }
}

fn absolute_from_cwd(path: &Path) -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn absolute_path_is_verbatim() {
        let store = VaultStore::with_home("/srv/vaults/team.enc", Some(Path::new("/home/u")));
        assert_eq!(store.path(), Path::new("/srv/vaults/team.enc"));
    }

    #[cfg(unix)]
    #[test]
    fn relative_path_joins_home() {
        let store = VaultStore::with_home("secrets/mine.enc", Some(Path::new("/home/u")));
        assert_eq!(store.path(), Path::new("/home/u/secrets/mine.enc"));
    }

    #[cfg(unix)]
    #[test]
    fn empty_path_uses_default_under_home() {
        let store = VaultStore::with_home("", Some(Path::new("/home/u")));
        assert_eq!(store.path(), Path::new("/home/u/.vault/vault.enc"));
    }

    #[test]
    fn uncheckable_path_counts_as_existing() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let store = VaultStore::new(blocker.join("vault.enc"));
        assert!(store.exists());
        assert!(!matches!(
            store.load("any-password"),
            Err(LockboxError::NotFound(_))
        ));
    }

    #[test]
    fn missing_file_does_not_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = VaultStore::new(dir.path().join("vault.enc"));
        assert!(!store.exists());
    }

    #[test]
    fn empty_path_without_home_falls_back_to_cwd() {
        let store = VaultStore::with_home("", None);
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(store.path(), cwd.join(DEFAULT_FILE));
    }

    #[test]
    fn relative_path_without_home_resolves_against_cwd() {
        let store = VaultStore::with_home("mine.enc", None);
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(store.path(), cwd.join("mine.enc"));
    }
}
