use thiserror::Error;

use crate::vault::VaultState;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Passphrase errors ---
    #[error("Passphrase mismatch — the confirmation does not match")]
    PassphraseMismatch,

    #[error("Wrong master passphrase")]
    WrongPassphrase,

    #[error("Master passphrase cannot be empty")]
    EmptyPassphrase,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — record was tampered with or the key is wrong")]
    TamperedOrWrongKey,

    #[error("Malformed encrypted field: {0}")]
    MalformedInput(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault is corrupt: {0}")]
    CorruptVault(String),

    #[error("Operation '{operation}' is not valid while the vault is {state}")]
    InvalidState {
        operation: &'static str,
        state: VaultState,
    },

    #[error("Invalid service name: {0}")]
    InvalidService(String),

    #[error("Record store error: {0}")]
    Storage(#[from] rusqlite::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Audit error: {0}")]
    AuditError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
