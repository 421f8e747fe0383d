//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM field encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 master key derivation (`kdf`)
//! - The zeroizing `MasterKey` wrapper (`keys`)
//! - The passphrase verification artifact (`verifier`)
//! - `CryptoEngine`, which owns a session key (`engine`)

pub mod encryption;
pub mod engine;
pub mod kdf;
pub mod keys;
pub mod verifier;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive, ...};
pub use encryption::{decrypt, encrypt};
pub use engine::CryptoEngine;
pub use kdf::{derive, generate_salt, PBKDF2_ITERATIONS, SALT_LEN};
pub use keys::MasterKey;
pub use verifier::{verification_hash, verify_passphrase};
