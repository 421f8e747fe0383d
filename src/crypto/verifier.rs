//! Passphrase verification artifact.
//!
//! The artifact is a salted SHA-256 digest of the passphrase, stored as
//! 64 lowercase hex characters.  It is computed independently of the
//! PBKDF2 master key: nothing here touches `MasterKey`, and the digest
//! is never used as key material.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::{Result, VaultError};

/// Domain-separation prefix mixed into every verification digest.
const DOMAIN_TAG: &[u8] = b"passvault-verify-v1";

/// Length of the hex-encoded digest.
pub const ARTIFACT_HEX_LEN: usize = 64;

/// Compute the hex-encoded verification digest for a passphrase.
pub fn verification_hash(passphrase: &str, salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(DOMAIN_TAG);
    hasher.update(salt);
    hasher.update(passphrase.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a candidate passphrase against a stored artifact.
///
/// The comparison is constant-time.
pub fn verify_passphrase(passphrase: &str, salt: &[u8], artifact: &str) -> Result<()> {
    let candidate = verification_hash(passphrase, salt);

    if candidate.as_bytes().ct_eq(artifact.as_bytes()).into() {
        Ok(())
    } else {
        Err(VaultError::WrongPassphrase)
    }
}

/// Returns `true` if `artifact` looks like a digest this module wrote.
pub fn is_well_formed(artifact: &str) -> bool {
    artifact.len() == ARTIFACT_HEX_LEN
        && artifact
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; 16] = [7u8; 16];

    #[test]
    fn hash_is_fixed_length_lowercase_hex() {
        let hash = verification_hash("p@ss", &SALT);
        assert!(is_well_formed(&hash));
        assert!(!hash.contains('\n'));
    }

    #[test]
    fn correct_passphrase_verifies() {
        let hash = verification_hash("p@ss", &SALT);
        assert!(verify_passphrase("p@ss", &SALT, &hash).is_ok());
    }

    #[test]
    fn wrong_passphrase_is_rejected() {
        let hash = verification_hash("p@ss", &SALT);
        let result = verify_passphrase("p@sS", &SALT, &hash);
        assert!(matches!(result, Err(VaultError::WrongPassphrase)));
    }

    #[test]
    fn salt_changes_the_digest() {
        assert_ne!(
            verification_hash("p@ss", &SALT),
            verification_hash("p@ss", &[8u8; 16])
        );
    }

    #[test]
    fn malformed_artifacts_are_detected() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed(&"G".repeat(ARTIFACT_HEX_LEN)));
        assert!(!is_well_formed(&"A".repeat(ARTIFACT_HEX_LEN)));
        assert!(is_well_formed(&"0f".repeat(ARTIFACT_HEX_LEN / 2)));
    }
}
