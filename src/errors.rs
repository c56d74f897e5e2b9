use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Crypto errors ---
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid framing: payload is too short to contain a nonce")]
    InvalidFraming,

    /// Wrong password and corrupted ciphertext are deliberately reported
    /// the same way.
    #[error("Invalid master password or corrupted vault")]
    AuthenticationFailed,

    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    NotFound(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidFormat(String),

    #[error("Corrupted vault data: {0}")]
    CorruptedData(String),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    // --- IO errors ---
    #[error("{context}: {source}")]
    IoContext {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl LockboxError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoContext {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
