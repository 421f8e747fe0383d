//! AES-256-GCM authenticated encryption of single string fields.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce.  The
//! tag is produced detached so the stored layout keeps it in a fixed
//! position, then the whole buffer is base64-encoded into one string:
//!
//! ```text
//! base64( [ 12-byte nonce | 16-byte auth tag | ciphertext ] )
//! ```

use aes_gcm::aead::{AeadInPlace, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce, Tag};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroize;

use super::keys::MasterKey;
use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key` and return the encoded field.
pub fn encrypt(key: &MasterKey, plaintext: &str) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Encrypted in place: after this call `buffer` holds the ciphertext.
    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(&nonce, b"", &mut buffer)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + TAG_LEN + buffer.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&tag);
    output.extend_from_slice(&buffer);

    Ok(BASE64.encode(output))
}

/// Decrypt a field produced by `encrypt`.
///
/// A tag that does not verify is always `TamperedOrWrongKey`; nothing
/// of the unauthenticated plaintext is returned.
pub fn decrypt(key: &MasterKey, encoded: &str) -> Result<String> {
    let data = BASE64
        .decode(encoded.trim())
        .map_err(|e| VaultError::MalformedInput(format!("invalid base64: {e}")))?;

    if data.len() < NONCE_LEN + TAG_LEN {
        return Err(VaultError::MalformedInput(format!(
            "field is {} bytes, shorter than nonce + tag ({})",
            data.len(),
            NONCE_LEN + TAG_LEN
        )));
    }

    let (nonce_bytes, rest) = data.split_at(NONCE_LEN);
    let (tag_bytes, ciphertext) = rest.split_at(TAG_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);
    let tag = Tag::from_slice(tag_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::TamperedOrWrongKey)?;

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut buffer, tag)
        .map_err(|_| VaultError::TamperedOrWrongKey)?;

    String::from_utf8(buffer).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        VaultError::MalformedInput("decrypted field is not valid UTF-8".into())
    })
}
