use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::generator;
use crate::errors::{LockboxError, Result};
use crate::vault::store::DEFAULT_DIR;

/// Smallest master password length accepted for a new vault.
pub const MIN_MASTER_PASSWORD_LEN: usize = 8;

/// User-level configuration, loaded from `~/.vault/config.toml`.
///
/// Every field has a sensible default so Lockbox works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Default vault location, resolved like `--vault` (empty = built-in default).
    #[serde(default)]
    pub vault_path: String,

    /// Length of passwords produced by `generate` and `--generate`.
    #[serde(default = "default_generated_password_length")]
    pub generated_password_length: usize,

    /// Minimum master password length for `init` (never below 8).
    #[serde(default = "default_min_master_password_length")]
    pub min_master_password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_generated_password_length() -> usize {
    generator::DEFAULT_LENGTH
}

fn default_min_master_password_length() -> usize {
    MIN_MASTER_PASSWORD_LEN
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: String::new(),
            generated_password_length: default_generated_password_length(),
            min_master_password_length: default_min_master_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// The default config directory: `~/.vault`, if a home directory exists.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_DIR))
    }

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Load from the default directory, or defaults when there is no home.
    pub fn load_default() -> Result<Self> {
        match Self::default_dir() {
            Some(dir) => Self::load(&dir),
            None => Ok(Self::default()),
        }
    }

    /// Generated password length, clamped to the generator's bounds.
    pub fn password_length(&self) -> usize {
        self.generated_password_length
            .clamp(generator::MIN_LENGTH, generator::MAX_LENGTH)
    }

    /// Minimum master password length, never below the hard floor.
    pub fn min_master_password_length(&self) -> usize {
        self.min_master_password_length.max(MIN_MASTER_PASSWORD_LEN)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
