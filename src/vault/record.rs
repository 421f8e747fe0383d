//! Credential types stored inside a vault.
//!
//! `CredentialRecord` is what the record store persists: the service
//! name in plaintext plus two encoded `EncryptedField` strings.
//! `Credential` is the decrypted pair handed back to callers.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single encrypted row, keyed by service name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// The service name (e.g. "github"). Case-sensitive, unique.
    pub service: String,

    /// base64(nonce | tag | ciphertext) of the login.
    pub encrypted_login: String,

    /// base64(nonce | tag | ciphertext) of the password.
    pub encrypted_password: String,
}

/// A decrypted login/password pair.  Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
