//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `CredentialRecord` and `Credential` types (`record`)
//! - The salt / verification artifacts and their paths (`artifacts`)
//! - The `RecordStore` seam and its SQLite implementation (`store`)
//! - The `PassphraseProvider` seam (`passphrase`)
//! - `Vault`, the create-or-verify lifecycle and record CRUD (`lifecycle`)

pub mod artifacts;
pub mod lifecycle;
pub mod passphrase;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use artifacts::VaultPaths;
pub use lifecycle::{OpenMode, Vault, VaultState};
pub use passphrase::{PassphraseProvider, StaticPassphrase};
pub use record::{Credential, CredentialRecord};
pub use store::{RecordStore, SqliteRecordStore};
