//! The in-memory vault: an ordered list of entries bound to one salt.
//!
//! All operations here are pure and synchronous.  Mutators take
//! `&mut self`, so a mutation always has exclusive access to the vault,
//! and lookups hand out copies rather than references into the list.

use crate::crypto::Salt;

use super::entry::{Entry, EntryFields};

/// The aggregate root of an unlocked session.
///
/// Insertion order is the only order; nothing is ever sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    entries: Vec<Entry>,
    salt: Salt,
}

impl Vault {
    /// An empty vault bound to `salt` for its whole lifetime.
    pub fn new(salt: Salt) -> Self {
        Self {
            entries: Vec::new(),
            salt,
        }
    }

    /// Rebuild a vault from already-validated parts (used by the store on load).
    pub(crate) fn from_parts(entries: Vec<Entry>, salt: Salt) -> Self {
        Self { entries, salt }
    }

    /// Append an entry.  Ids are not deduplicated here; `Entry::new`
    /// already generates random ones.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Rewrite the first entry whose id matches.
    ///
    /// Returns `false` when no entry has that id; this is a normal outcome.
    pub fn update_entry(&mut self, id: &str, fields: EntryFields) -> bool {
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(entry) => {
                entry.update(fields);
                true
            }
            None => false,
        }
    }

    /// Remove the first entry whose id matches, keeping the rest in order.
    pub fn delete_entry(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|e| e.id() == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// A copy of the entry with this id, if any.
    pub fn get_entry(&self, id: &str) -> Option<Entry> {
        self.entries.iter().find(|e| e.id() == id).cloned()
    }

    /// Copies of all entries matching `query`, in vault order.
    ///
    /// An empty query returns every entry.
    pub fn search_entries(&self, query: &str) -> Vec<Entry> {
        if query.is_empty() {
            return self.entries.clone();
        }
        self.entries
            .iter()
            .filter(|e| e.matches(query))
            .cloned()
            .collect()
    }

    /// Read-only view of the entries in vault order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }
}
