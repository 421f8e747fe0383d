//! On-disk artifacts that sit next to the record store.
//!
//! A vault is three files:
//!
//! ```text
//! passwords.db     SQLite record store
//! vault_salt.bin   16 raw salt bytes
//! master_hash.txt  64 hex chars, no trailing newline
//! ```
//!
//! The salt and the verification digest are written once, atomically,
//! and never rewritten.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::crypto::kdf::SALT_LEN;
use crate::crypto::verifier;
use crate::errors::{Result, VaultError};

/// Default file names inside a vault directory.
pub const DEFAULT_VAULT_FILE: &str = "passwords.db";
pub const DEFAULT_SALT_FILE: &str = "vault_salt.bin";
pub const DEFAULT_VERIFICATION_FILE: &str = "master_hash.txt";

/// Locations of the three artifacts that make up one vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPaths {
    pub vault: PathBuf,
    pub salt: PathBuf,
    pub verification: PathBuf,
}

impl VaultPaths {
    pub fn new(
        vault: impl Into<PathBuf>,
        salt: impl Into<PathBuf>,
        verification: impl Into<PathBuf>,
    ) -> Self {
        Self {
            vault: vault.into(),
            salt: salt.into(),
            verification: verification.into(),
        }
    }

    /// All three artifacts under `dir` with the default file names.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(DEFAULT_VAULT_FILE),
            dir.join(DEFAULT_SALT_FILE),
            dir.join(DEFAULT_VERIFICATION_FILE),
        )
    }
}

/// Persist the salt.
pub fn write_salt(path: &Path, salt: &[u8; SALT_LEN]) -> Result<()> {
    write_atomic(path, salt)
}

/// Read the salt of an existing vault.
///
/// Anything other than exactly `SALT_LEN` readable bytes is a corrupt vault.
pub fn read_salt(path: &Path) -> Result<[u8; SALT_LEN]> {
    if !path.exists() {
        return Err(VaultError::CorruptVault(format!(
            "salt file missing at {}",
            path.display()
        )));
    }

    let data = fs::read(path).map_err(|e| {
        VaultError::CorruptVault(format!("cannot read salt file {}: {e}", path.display()))
    })?;

    data.as_slice().try_into().map_err(|_| {
        VaultError::CorruptVault(format!(
            "salt file must be exactly {SALT_LEN} bytes, got {}",
            data.len()
        ))
    })
}

/// Persist the hex verification digest (no trailing newline).
pub fn write_verification(path: &Path, artifact: &str) -> Result<()> {
    write_atomic(path, artifact.as_bytes())
}

/// Read the verification digest of an existing vault.
pub fn read_verification(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(VaultError::CorruptVault(format!(
            "verification file missing at {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VaultError::CorruptVault(format!(
            "cannot read verification file {}: {e}",
            path.display()
        ))
    })?;

    // Tolerate a trailing newline added by hand-editing.
    let artifact = contents.trim();
    if !verifier::is_well_formed(artifact) {
        return Err(VaultError::CorruptVault(format!(
            "verification file {} does not hold a hex digest",
            path.display()
        )));
    }

    Ok(artifact.to_string())
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write `bytes` to a temp file next to `path`, then rename it over
/// `path`, so readers never see a half-written artifact.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    // Leftover from an interrupted write.
    match fs::remove_file(&tmp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}
