//! Vault module: the record model and its encrypted persistence.
//!
//! This module provides:
//! - `Entry` and `EntryFields` credential records (`entry`)
//! - The in-memory `Vault` aggregate and its mutations (`model`)
//! - File framing, the plaintext document and atomic writes (`format`)
//! - `VaultStore` for creating, loading, saving and deleting vaults (`store`)

pub mod entry;
pub mod format;
pub mod model;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Entry, EntryFields};
pub use model::Vault;
pub use store::VaultStore;
