//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is fixed: the vault file carries no parameters,
//! so every vault ever written must be re-derivable with the same cost.

use rand::TryRngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{LockboxError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// A per-vault random salt.
///
/// Salts are public; they are stored in the clear as the vault file prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Wrap raw salt bytes.
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a salt from a slice, which must be exactly `SALT_LEN` bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; SALT_LEN]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

/// A derived 32-byte symmetric key that zeroes its memory when dropped.
///
/// Keys are never persisted; one is derived for each load or save and
/// goes away at the end of that call, on success and error alike.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; KEY_LEN],
}

impl Key {
    /// Create a new `Key` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// Deterministic: the same password + salt always produce the same key.
/// Deliberately slow; callers should not derive more often than needed.
pub fn derive_key(password: &str, salt: &Salt) -> Key {
    derive_with_rounds(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS)
}

fn derive_with_rounds(password: &[u8], salt: &[u8], rounds: u32) -> Key {
    let mut key = Key::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut key.bytes);
    key
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> Result<Salt> {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| LockboxError::EntropyUnavailable(format!("salt generation: {e}")))?;
    Ok(Salt(salt))
}
