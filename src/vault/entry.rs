//! Credential entries stored inside a vault.
//!
//! An `Entry` carries its user-visible fields plus an immutable id and
//! two UTC timestamps.  Optional text fields are omitted from the
//! serialized document when empty.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::secure_wipe_string;

/// Number of random bytes in an entry id (rendered as 16 hex chars).
pub const ID_BYTES: usize = 8;

/// The user-editable fields of an entry.
///
/// Used both to create entries and to rewrite them on update.  Callers
/// holding one across fallible steps wrap it in `Zeroizing`.
#[derive(Clone, Default, PartialEq, Eq, Zeroize)]
pub struct EntryFields {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
}

/// A single credential record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Entry {
    id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[zeroize(skip)]
    created_at: DateTime<Utc>,
    #[zeroize(skip)]
    updated_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry with a fresh id and `created_at == updated_at == now`.
    pub fn new(fields: EntryFields) -> Self {
        let now = Utc::now();
        let mut entry = Self {
            id: generate_id(),
            title: String::new(),
            username: String::new(),
            password: String::new(),
            url: String::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        };
        entry.assign(fields);
        entry
    }

    /// Rewrite every user-visible field and bump `updated_at`.
    ///
    /// `updated_at` always moves forward, even if the clock has not
    /// advanced since the last write.
    pub fn update(&mut self, fields: EntryFields) {
        self.assign(fields);

        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::nanoseconds(1)
        };
    }

    /// Case-insensitive substring match against title, username, url and notes.
    ///
    /// The password is never searched.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.title, &self.username, &self.url, &self.notes]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    /// Copy out the user-visible fields, e.g. to pre-fill an edit.
    pub fn fields(&self) -> EntryFields {
        EntryFields {
            title: self.title.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            url: self.url.clone(),
            notes: self.notes.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn assign(&mut self, fields: EntryFields) {
        // Old values are zeroed before being replaced.
        for field in [
            &mut self.title,
            &mut self.username,
            &mut self.password,
            &mut self.url,
            &mut self.notes,
        ] {
            secure_wipe_string(field);
        }

        self.title = fields.title;
        self.username = fields.username;
        self.password = fields.password;
        self.url = fields.url;
        self.notes = fields.notes;
    }
}

const REDACTED: &str = "[REDACTED]";

impl fmt::Debug for EntryFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryFields")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("url", &self.url)
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Generate a random entry id: 8 random bytes as 16 lowercase hex chars.
///
/// No check against existing ids is made; collisions are negligible.
pub fn generate_id() -> String {
    let bytes: [u8; ID_BYTES] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
