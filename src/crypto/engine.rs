//! `CryptoEngine`: the single owner of a session's master key.

use super::encryption;
use super::kdf;
use super::keys::MasterKey;
use crate::errors::Result;

/// Encrypts and decrypts vault fields under one master key.
///
/// The engine knows nothing about storage.  The key is zeroized when the
/// engine is dropped.
#[derive(Debug)]
pub struct CryptoEngine {
    key: MasterKey,
}

impl CryptoEngine {
    /// Wrap an already-derived master key.
    pub fn new(key: MasterKey) -> Self {
        Self { key }
    }

    /// Derive the master key from `passphrase` + `salt` and wrap it.
    pub fn from_passphrase(passphrase: &str, salt: &[u8]) -> Result<Self> {
        Ok(Self::new(kdf::derive(passphrase, salt)?))
    }

    /// Encrypt one field with a fresh nonce.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        encryption::encrypt(&self.key, plaintext)
    }

    /// Decrypt one field, failing hard on authentication errors.
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        encryption::decrypt(&self.key, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VaultError;

    #[test]
    fn engines_from_same_inputs_interoperate() {
        let salt = [3u8; kdf::SALT_LEN];
        let writer = CryptoEngine::from_passphrase("p@ss", &salt).unwrap();
        let reader = CryptoEngine::from_passphrase("p@ss", &salt).unwrap();

        let field = writer.encrypt("alice").unwrap();
        assert_eq!(reader.decrypt(&field).unwrap(), "alice");
    }

    #[test]
    fn engine_with_other_passphrase_cannot_read() {
        let salt = [3u8; kdf::SALT_LEN];
        let writer = CryptoEngine::from_passphrase("p@ss", &salt).unwrap();
        let reader = CryptoEngine::from_passphrase("p@ss2", &salt).unwrap();

        let field = writer.encrypt("alice").unwrap();
        assert!(matches!(
            reader.decrypt(&field),
            Err(VaultError::TamperedOrWrongKey)
        ));
    }
}
