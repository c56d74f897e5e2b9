//! On-disk vault file format and the plaintext vault document.
//!
//! A vault file has this layout:
//!
//! ```text
//! [salt: 32 bytes][nonce: 12 bytes][ciphertext || 16-byte GCM tag]
//! ```
//!
//! - **Salt**: stored in the clear; the only salt used for key derivation.
//! - **Nonce + ciphertext**: the cipher's `encrypt` output, verbatim.
//!
//! The plaintext under encryption is a JSON document:
//! `{"entries": [...], "salt": "<base64>"}`.  The inner salt is a
//! redundant copy of the prefix; it is written on every save but only
//! read for a consistency check.
//!
//! There is no magic number or version field.  Changing this layout is
//! a breaking change.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;
use zeroize::Zeroizing;

use super::entry::Entry;
use super::model::Vault;
use crate::crypto::{Salt, SALT_LEN};
use crate::errors::{LockboxError, Result};

/// Permissions for the vault file (owner read/write only).
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o600;

/// Permissions for the directory holding the vault (owner only).
#[cfg(unix)]
pub const DIR_MODE: u32 = 0o700;

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

/// Split a raw vault file into its salt prefix and encrypted payload.
///
/// Files shorter than the salt are rejected before any crypto runs.
pub fn split_frame(data: &[u8]) -> Result<(Salt, &[u8])> {
    if data.len() < SALT_LEN {
        return Err(LockboxError::InvalidFormat(format!(
            "file is {} bytes, shorter than the {SALT_LEN}-byte salt prefix",
            data.len()
        )));
    }
    let (salt_bytes, payload) = data.split_at(SALT_LEN);
    let salt = Salt::from_slice(salt_bytes)
        .ok_or_else(|| LockboxError::InvalidFormat("bad salt prefix".into()))?;
    Ok((salt, payload))
}

/// Build the file bytes: `salt || payload`.
pub fn join_frame(salt: &Salt, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SALT_LEN + payload.len());
    buf.extend_from_slice(salt.as_bytes());
    buf.extend_from_slice(payload);
    buf
}

// ---------------------------------------------------------------------------
// Plaintext document
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DocumentRef<'a> {
    entries: &'a [Entry],
    salt: &'a Salt,
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    entries: Option<Vec<Entry>>,
    #[serde(default)]
    salt: Option<Salt>,
}

/// Serialize a vault into its canonical JSON plaintext.
///
/// The buffer is wiped when dropped.
pub fn encode_vault(vault: &Vault) -> Result<Zeroizing<Vec<u8>>> {
    let doc = DocumentRef {
        entries: vault.entries(),
        salt: vault.salt(),
    };
    let bytes = serde_json::to_vec(&doc)
        .map_err(|e| LockboxError::SerializationError(format!("vault: {e}")))?;
    Ok(Zeroizing::new(bytes))
}

/// Parse decrypted plaintext into a vault bound to `file_salt`.
///
/// The file prefix salt is authoritative.  An inner salt that disagrees
/// is logged and ignored.  Entries with empty or repeated ids are
/// rejected as corruption.
pub fn decode_vault(plaintext: &[u8], file_salt: Salt) -> Result<Vault> {
    let doc: Document = serde_json::from_slice(plaintext)
        .map_err(|e| LockboxError::CorruptedData(format!("vault JSON: {e}")))?;

    if let Some(inner) = doc.salt {
        if inner != file_salt {
            warn!("inner salt copy differs from file prefix; using the prefix");
        }
    }

    let entries = doc.entries.unwrap_or_default();
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if entry.id().is_empty() {
            return Err(LockboxError::CorruptedData("entry without an id".into()));
        }
        if !seen.insert(entry.id()) {
            return Err(LockboxError::CorruptedData(format!(
                "duplicate entry id {}",
                entry.id()
            )));
        }
    }

    Ok(Vault::from_parts(entries, file_salt))
}

// ---------------------------------------------------------------------------
// File IO
// ---------------------------------------------------------------------------

/// Create `dir` (and parents) if missing, owner-only on Unix.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(dir)
        .map_err(|e| LockboxError::io(format!("failed to create vault directory {}", dir.display()), e))
}

/// Read the whole vault file.
pub fn read_vault_file(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LockboxError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(LockboxError::io(
            format!("failed to read vault file {}", path.display()),
            e,
        )),
    }
}

/// Write a vault file **atomically** with owner-only permissions.
///
/// 1. Write to a temp file in the same directory (created 0600).
/// 2. Flush it to disk.
/// 3. Rename the temp file over the target path.
///
/// A failure at any step leaves the previous file untouched.
pub fn write_vault_file(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let written = write_owner_only(&tmp_path, data).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| {
            LockboxError::io(format!("failed to replace vault file {}", path.display()), e)
        })
    });

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn write_owner_only(path: &Path, data: &[u8]) -> Result<()> {
    let context = || format!("failed to write vault file {}", path.display());

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(|e| LockboxError::io(context(), e))?;

    // `mode` only applies on creation; tighten a leftover temp file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(FILE_MODE))
            .map_err(|e| LockboxError::io(context(), e))?;
    }

    file.write_all(data).map_err(|e| LockboxError::io(context(), e))?;
    file.sync_all().map_err(|e| LockboxError::io(context(), e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde for the inner salt copy (base64 string in JSON)
// ---------------------------------------------------------------------------

impl Serialize for Salt {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(self.as_bytes()))
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = BASE64.decode(&s).map_err(serde::de::Error::custom)?;
        Salt::from_slice(&bytes).ok_or_else(|| {
            serde::de::Error::custom(format!("salt must be {SALT_LEN} bytes, got {}", bytes.len()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::EntryFields;
    use tempfile::TempDir;

    fn salt(byte: u8) -> Salt {
        Salt::from_bytes([byte; SALT_LEN])
    }

    #[test]
    fn split_rejects_short_files() {
        for len in [0, 1, SALT_LEN - 1] {
            let data = vec![0u8; len];
            let result = split_frame(&data);
            assert!(matches!(result, Err(LockboxError::InvalidFormat(_))));
        }
    }

    #[test]
    fn split_and_join_agree_on_layout() {
        let framed = join_frame(&salt(9), b"payload");
        assert_eq!(&framed[..SALT_LEN], &[9u8; SALT_LEN]);

        let (prefix, payload) = split_frame(&framed).unwrap();
        assert_eq!(prefix, salt(9));
        assert_eq!(payload, b"payload");
    }

    #[test]
    fn document_carries_entries_and_inner_salt() {
        let mut vault = Vault::new(salt(3));
        vault.add_entry(Entry::new(EntryFields {
            title: "Email".into(),
            ..EntryFields::default()
        }));

        let plaintext = encode_vault(&vault).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&plaintext).unwrap();
        assert_eq!(json["entries"].as_array().unwrap().len(), 1);
        assert_eq!(json["salt"], BASE64.encode([3u8; SALT_LEN]));

        let decoded = decode_vault(&plaintext, salt(3)).unwrap();
        assert_eq!(decoded, vault);
    }

    #[test]
    fn prefix_salt_wins_over_inner_copy() {
        let vault = Vault::new(salt(3));
        let plaintext = encode_vault(&vault).unwrap();
        let decoded = decode_vault(&plaintext, salt(4)).unwrap();
        assert_eq!(decoded.salt(), &salt(4));
    }

    #[test]
    fn null_or_missing_entries_load_empty() {
        assert!(decode_vault(br#"{"entries":null}"#, salt(1)).unwrap().is_empty());
        assert!(decode_vault(b"{}", salt(1)).unwrap().is_empty());
    }

    #[test]
    fn non_json_plaintext_is_corrupted_data() {
        let result = decode_vault(b"not json", salt(1));
        assert!(matches!(result, Err(LockboxError::CorruptedData(_))));
    }

    #[test]
    fn duplicate_or_empty_ids_are_corrupted_data() {
        let entry = r#"{"id":"aa","title":"t","password":"","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}"#;
        let dup = format!(r#"{{"entries":[{entry},{entry}]}}"#);
        assert!(matches!(
            decode_vault(dup.as_bytes(), salt(1)),
            Err(LockboxError::CorruptedData(_))
        ));

        let empty = entry.replace(r#""id":"aa""#, r#""id":"""#);
        let doc = format!(r#"{{"entries":[{empty}]}}"#);
        assert!(matches!(
            decode_vault(doc.as_bytes(), salt(1)),
            Err(LockboxError::CorruptedData(_))
        ));
    }

    #[test]
    fn write_replaces_content_and_cleans_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.enc");

        write_vault_file(&path, b"first").unwrap();
        write_vault_file(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!dir.path().join(".vault.enc.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn written_file_and_created_dir_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let vault_dir = dir.path().join("nested").join(".vault");
        ensure_dir(&vault_dir).unwrap();
        let path = vault_dir.join("vault.enc");
        write_vault_file(&path, b"data").unwrap();

        let dir_mode = fs::metadata(&vault_dir).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, DIR_MODE);
        assert_eq!(file_mode, FILE_MODE);
    }

    #[test]
    fn reading_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = read_vault_file(&dir.path().join("absent.enc"));
        assert!(matches!(result, Err(LockboxError::NotFound(_))));
    }
}
