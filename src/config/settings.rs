use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};
use crate::vault::artifacts::{DEFAULT_SALT_FILE, DEFAULT_VAULT_FILE, DEFAULT_VERIFICATION_FILE};
use crate::vault::VaultPaths;

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.  Passphrases are never read from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) holding the vault artifacts.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// File name of the SQLite record store.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// File name of the 16-byte salt.
    #[serde(default = "default_salt_file")]
    pub salt_file: String,

    /// File name of the passphrase verification digest.
    #[serde(default = "default_verification_file")]
    pub verification_file: String,

    /// File name of the audit log database.
    #[serde(default = "default_audit_file")]
    pub audit_file: String,

    /// Default `tracing` level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_vault_file() -> String {
    DEFAULT_VAULT_FILE.to_string()
}

fn default_salt_file() -> String {
    DEFAULT_SALT_FILE.to_string()
}

fn default_verification_file() -> String {
    DEFAULT_VERIFICATION_FILE.to_string()
}

fn default_audit_file() -> String {
    "logs.db".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            vault_file: default_vault_file(),
            salt_file: default_salt_file(),
            verification_file: default_verification_file(),
            audit_file: default_audit_file(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// The directory holding all vault artifacts.
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// Resolve the three vault artifacts.
    ///
    /// Example: `project_dir/data/passwords.db`
    pub fn vault_paths(&self, project_dir: &Path) -> VaultPaths {
        let dir = self.data_path(project_dir);
        VaultPaths::new(
            dir.join(&self.vault_file),
            dir.join(&self.salt_file),
            dir.join(&self.verification_file),
        )
    }

    /// Path to the audit log database.
    pub fn audit_path(&self, project_dir: &Path) -> PathBuf {
        self.data_path(project_dir).join(&self.audit_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.data_dir, "data");
        assert_eq!(s.vault_file, "passwords.db");
        assert_eq!(s.salt_file, "vault_salt.bin");
        assert_eq!(s.verification_file, "master_hash.txt");
        assert_eq!(s.audit_file, "logs.db");
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, "data");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
data_dir = "secrets"
vault_file = "vault.db"
salt_file = "salt.bin"
verification_file = "check.txt"
audit_file = "audit.db"
log_level = "debug"
"#;
        fs::write(tmp.path().join(".passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, "secrets");
        assert_eq!(settings.vault_file, "vault.db");
        assert_eq!(settings.salt_file, "salt.bin");
        assert_eq!(settings.verification_file, "check.txt");
        assert_eq!(settings.audit_file, "audit.db");
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "data_dir = \"vault\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, "vault");
        assert_eq!(settings.vault_file, "passwords.db");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn vault_paths_builds_correct_paths() {
        let s = Settings::default();
        let paths = s.vault_paths(Path::new("/home/user/project"));
        assert_eq!(
            paths.vault,
            PathBuf::from("/home/user/project/data/passwords.db")
        );
        assert_eq!(
            paths.salt,
            PathBuf::from("/home/user/project/data/vault_salt.bin")
        );
        assert_eq!(
            paths.verification,
            PathBuf::from("/home/user/project/data/master_hash.txt")
        );
    }

    #[test]
    fn audit_path_respects_custom_data_dir() {
        let s = Settings {
            data_dir: "secrets".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            s.audit_path(Path::new("/p")),
            PathBuf::from("/p/secrets/logs.db")
        );
    }
}
