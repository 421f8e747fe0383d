//! Vault lifecycle: create-or-verify on open, record CRUD while
//! unlocked, and deterministic release on close.
//!
//! ```text
//! Uninitialized ─┬─ CreatingNew ───────┬─ Unlocked ── Closed
//!                └─ VerifyingExisting ─┘
//!                        └── Fatal (missing/corrupt salt or digest)
//! ```
//!
//! `VerifyingExisting` re-prompts on a wrong passphrase for as long as
//! the provider keeps answering; there is no attempt counter.

use std::fmt;

use tracing::{debug, info, warn};

use super::artifacts::{self, VaultPaths};
use super::passphrase::PassphraseProvider;
use super::record::{Credential, CredentialRecord};
use super::store::{RecordStore, SqliteRecordStore};
use crate::audit::AuditSink;
use crate::crypto::{generate_salt, verification_hash, verify_passphrase, CryptoEngine, SALT_LEN};
use crate::errors::{Result, VaultError};

/// Where a `Vault` is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    Uninitialized,
    CreatingNew,
    VerifyingExisting,
    Unlocked,
    Closed,
    Fatal,
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::CreatingNew => "being created",
            Self::VerifyingExisting => "verifying",
            Self::Unlocked => "unlocked",
            Self::Closed => "closed",
            Self::Fatal => "unusable",
        };
        f.write_str(name)
    }
}

/// Which arm of `open` a set of paths leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    CreateNew,
    VerifyExisting,
}

impl OpenMode {
    /// Decide from what is on disk.
    ///
    /// A record store without its salt cannot be decrypted, so that
    /// combination is a corrupt vault rather than a fresh one.
    pub fn detect(paths: &VaultPaths) -> Result<Self> {
        match (paths.vault.exists(), paths.salt.exists()) {
            (false, _) => Ok(Self::CreateNew),
            (true, true) => Ok(Self::VerifyExisting),
            (true, false) => Err(VaultError::CorruptVault(format!(
                "record store {} exists but its salt file {} is missing",
                paths.vault.display(),
                paths.salt.display()
            ))),
        }
    }
}

/// Everything that only exists while the vault is unlocked.
struct Session {
    engine: CryptoEngine,
    store: Box<dyn RecordStore>,
}

/// An open credential vault.
///
/// Created by `Vault::open`; holds the session's `CryptoEngine` and the
/// record-store handle until `close` (or drop).
pub struct Vault {
    paths: VaultPaths,
    state: VaultState,
    session: Option<Session>,
    audit: Box<dyn AuditSink>,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a new vault or unlock an existing one.
    ///
    /// Passphrases come from `provider`.  On success the vault is
    /// `Unlocked`; every error before that point is returned as-is.
    pub fn open(
        paths: VaultPaths,
        provider: &mut dyn PassphraseProvider,
        audit: Box<dyn AuditSink>,
    ) -> Result<Self> {
        let mut vault = Self {
            paths,
            state: VaultState::Uninitialized,
            session: None,
            audit,
        };

        let mode = match OpenMode::detect(&vault.paths) {
            Ok(mode) => mode,
            Err(e) => {
                vault.fail(&e);
                return Err(e);
            }
        };

        let engine = match mode {
            OpenMode::CreateNew => {
                vault.state = VaultState::CreatingNew;
                vault.create_new(provider)?
            }
            OpenMode::VerifyExisting => {
                vault.state = VaultState::VerifyingExisting;
                vault.verify_existing(provider)?
            }
        };

        artifacts::ensure_parent_dir(&vault.paths.vault)?;
        let store = SqliteRecordStore::open(&vault.paths.vault)?;

        vault.session = Some(Session {
            engine,
            store: Box::new(store),
        });
        vault.state = VaultState::Unlocked;
        info!(vault = %vault.paths.vault.display(), ?mode, "vault unlocked");

        Ok(vault)
    }

    /// New-vault arm: confirm the passphrase, then write salt and digest.
    fn create_new(&mut self, provider: &mut dyn PassphraseProvider) -> Result<CryptoEngine> {
        let (passphrase, confirmation) = provider.new_passphrase()?;

        if passphrase.is_empty() {
            return Err(VaultError::EmptyPassphrase);
        }
        if passphrase.as_str() != confirmation.as_str() {
            return Err(VaultError::PassphraseMismatch);
        }

        let salt = generate_salt();
        let engine = CryptoEngine::from_passphrase(&passphrase, &salt)?;

        // Salt first: a digest without its salt could never verify.
        artifacts::write_salt(&self.paths.salt, &salt)?;
        artifacts::write_verification(
            &self.paths.verification,
            &verification_hash(&passphrase, &salt),
        )?;

        debug!(salt = %self.paths.salt.display(), "vault artifacts written");
        self.audit.log("vault_created", &self.context());
        Ok(engine)
    }

    /// Existing-vault arm: loop until the provider supplies a passphrase
    /// matching the stored digest, or gives up.
    fn verify_existing(&mut self, provider: &mut dyn PassphraseProvider) -> Result<CryptoEngine> {
        let (salt, artifact) = match self.load_artifacts() {
            Ok(loaded) => loaded,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };

        loop {
            let passphrase = provider.passphrase()?;

            let outcome = if passphrase.is_empty() {
                Err(VaultError::EmptyPassphrase)
            } else {
                verify_passphrase(&passphrase, &salt, &artifact)
            };

            match outcome {
                Ok(()) => {
                    self.audit.log("passphrase_accepted", &self.context());
                    return CryptoEngine::from_passphrase(&passphrase, &salt);
                }
                Err(e) => {
                    warn!(error = %e, "master passphrase refused");
                    self.audit.log("passphrase_rejected", &self.context());
                    provider.rejected(&e)?;
                }
            }
        }
    }

    fn load_artifacts(&self) -> Result<([u8; SALT_LEN], String)> {
        let salt = artifacts::read_salt(&self.paths.salt)?;
        let artifact = artifacts::read_verification(&self.paths.verification)?;
        Ok((salt, artifact))
    }

    fn fail(&mut self, error: &VaultError) {
        self.state = VaultState::Fatal;
        tracing::error!(error = %error, vault = %self.paths.vault.display(), "vault unusable");
        self.audit.log("vault_corrupt", &self.context());
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Encrypt and upsert the credentials for `service`.
    ///
    /// Login and password are encrypted independently, each with its
    /// own nonce.  The row is committed before this returns.
    pub fn save(&mut self, service: &str, login: &str, password: &str) -> Result<()> {
        validate_service(service)?;
        let session = self.session_mut("save")?;

        let record = CredentialRecord {
            service: service.to_string(),
            encrypted_login: session.engine.encrypt(login)?,
            encrypted_password: session.engine.encrypt(password)?,
        };
        session.store.put(&record)?;

        self.audit.log("save_password", service);
        Ok(())
    }

    /// Decrypt the credentials for `service`.
    ///
    /// `Ok(None)` means no such service; a stored record that fails
    /// authentication is `Err(TamperedOrWrongKey)`.  Failed reads are
    /// audited as `get_password_failed`.
    pub fn get(&self, service: &str) -> Result<Option<Credential>> {
        let session = self.session("get")?;

        let result = session.store.fetch(service).and_then(|found| match found {
            Some(record) => Ok(Some(Credential {
                login: session.engine.decrypt(&record.encrypted_login)?,
                password: session.engine.decrypt(&record.encrypted_password)?,
            })),
            None => Ok(None),
        });

        match &result {
            Ok(_) => self.audit.log("get_password", service),
            Err(e) => {
                warn!(service, error = %e, "credential read failed");
                self.audit.log("get_password_failed", service);
            }
        }
        result
    }

    /// Whether a record exists for `service`.  Nothing is decrypted or
    /// audited.
    pub fn contains(&self, service: &str) -> Result<bool> {
        Ok(self.session("contains")?.store.fetch(service)?.is_some())
    }

    /// All service names in ascending order.  Nothing is decrypted.
    pub fn list(&self) -> Result<Vec<String>> {
        let services = self.session("list")?.store.services()?;
        self.audit.log("list_services", &self.context());
        Ok(services)
    }

    /// Remove the record for `service`, if any.
    ///
    /// Returns whether a record was removed; a missing service is not
    /// an error.  Every call is audited.
    pub fn delete(&mut self, service: &str) -> Result<bool> {
        let removed = self.session_mut("delete")?.store.remove(service)?;
        self.audit.log("delete_password", service);
        Ok(removed)
    }

    /// Release the record store and drop the master key.
    ///
    /// Closing an already closed vault does nothing.
    pub fn close(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        self.state = VaultState::Closed;

        // Dropping the engine zeroizes the key.
        let Session { engine, store } = session;
        drop(engine);
        store.close()?;

        self.audit.log("vault_closed", &self.context());
        debug!(vault = %self.paths.vault.display(), "vault closed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> VaultState {
        self.state
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    fn session(&self, operation: &'static str) -> Result<&Session> {
        match (&self.session, self.state) {
            (Some(session), VaultState::Unlocked) => Ok(session),
            (_, state) => Err(VaultError::InvalidState { operation, state }),
        }
    }

    fn session_mut(&mut self, operation: &'static str) -> Result<&mut Session> {
        match (&mut self.session, self.state) {
            (Some(session), VaultState::Unlocked) => Ok(session),
            (_, state) => Err(VaultError::InvalidState { operation, state }),
        }
    }

    fn context(&self) -> String {
        self.paths.vault.display().to_string()
    }
}

/// Service names are free-form but must not be blank.
fn validate_service(service: &str) -> Result<()> {
    if service.trim().is_empty() {
        return Err(VaultError::InvalidService(
            "service name cannot be empty".into(),
        ));
    }
    Ok(())
}
