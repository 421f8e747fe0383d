//! Integration tests for the PassVault crypto module.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use passvault::crypto::encryption::{NONCE_LEN, TAG_LEN};
use passvault::crypto::{decrypt, derive, encrypt, generate_salt, CryptoEngine, MasterKey};
use passvault::errors::VaultError;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = MasterKey::new([0xABu8; 32]);

    for plaintext in ["secret1", "a", "пароль-🔐", "spaces and\ttabs\n", ""] {
        let encoded = encrypt(&key, plaintext).expect("encrypt should succeed");
        let recovered = decrypt(&key, &encoded).expect("decrypt should succeed");
        assert_eq!(recovered, plaintext);
    }
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = MasterKey::new([0xCDu8; 32]);

    let ct1 = encrypt(&key, "hunter2").expect("encrypt 1");
    let ct2 = encrypt(&key, "hunter2").expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");

    let nonce1 = &BASE64.decode(&ct1).unwrap()[..NONCE_LEN];
    let nonce2 = &BASE64.decode(&ct2).unwrap()[..NONCE_LEN];
    assert_ne!(nonce1, nonce2, "nonces must never repeat");
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = MasterKey::new([0x11u8; 32]);
    let wrong_key = MasterKey::new([0x22u8; 32]);

    let encoded = encrypt(&key, "TOP_SECRET").expect("encrypt");
    let result = decrypt(&wrong_key, &encoded);

    assert!(matches!(result, Err(VaultError::TamperedOrWrongKey)));
}

#[test]
fn flipping_any_byte_is_detected() {
    let key = MasterKey::new([0xBBu8; 32]);
    let encoded = encrypt(&key, "correct horse").expect("encrypt");
    let raw = BASE64.decode(&encoded).unwrap();

    // Nonce, tag and ciphertext positions alike.
    for i in 0..raw.len() {
        let mut tampered = raw.clone();
        tampered[i] ^= 0x01;
        let result = decrypt(&key, &BASE64.encode(&tampered));
        assert!(
            matches!(result, Err(VaultError::TamperedOrWrongKey)),
            "flipping byte {i} must fail authentication"
        );
    }
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let key = MasterKey::new([0xAAu8; 32]);
    let short = BASE64.encode([0u8; NONCE_LEN + TAG_LEN - 1]);

    assert!(matches!(
        decrypt(&key, &short),
        Err(VaultError::MalformedInput(_))
    ));
}

#[test]
fn decrypt_rejects_non_base64() {
    let key = MasterKey::new([0xAAu8; 32]);
    assert!(matches!(
        decrypt(&key, "%%%"),
        Err(VaultError::MalformedInput(_))
    ));
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2-HMAC-SHA256)
// ---------------------------------------------------------------------------

#[test]
fn derive_same_inputs_same_output() {
    let salt = generate_salt();

    let key1 = derive("my-secure-passphrase", &salt).expect("derive 1");
    let key2 = derive("my-secure-passphrase", &salt).expect("derive 2");

    assert_eq!(key1, key2, "same passphrase + salt must produce the same key");
}

#[test]
fn derive_different_salts_different_keys() {
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive("same-passphrase", &salt1).expect("derive 1");
    let key2 = derive("same-passphrase", &salt2).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_different_passphrases_different_keys() {
    let salt = generate_salt();

    let key1 = derive("passphrase-one", &salt).expect("derive 1");
    let key2 = derive("passphrase-two", &salt).expect("derive 2");

    assert_ne!(key1, key2);
}

#[test]
fn derive_rejects_wrong_salt_length() {
    assert!(matches!(
        derive("p@ss", &[0u8; 32]),
        Err(VaultError::KeyDerivationFailed(_))
    ));
}

// ---------------------------------------------------------------------------
// End-to-end: passphrase -> engine -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let salt = generate_salt();

    let engine = CryptoEngine::from_passphrase("p@ss", &salt).expect("derive");
    let login = engine.encrypt("alice").expect("encrypt login");
    let password = engine.encrypt("secret1").expect("encrypt password");

    // A fresh engine from the same passphrase and salt reads both fields.
    let reopened = CryptoEngine::from_passphrase("p@ss", &salt).expect("derive again");
    assert_eq!(reopened.decrypt(&login).unwrap(), "alice");
    assert_eq!(reopened.decrypt(&password).unwrap(), "secret1");

    // Another salt means another key.
    let other = CryptoEngine::from_passphrase("p@ss", &generate_salt()).expect("derive other");
    assert!(matches!(
        other.decrypt(&login),
        Err(VaultError::TamperedOrWrongKey)
    ));
}
