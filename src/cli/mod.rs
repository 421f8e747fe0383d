//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::Parser;

use crate::audit::{self, AuditSink};
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::{OpenMode, PassphraseProvider, StaticPassphrase, Vault, VaultPaths};

use self::prompt::PromptPassphrase;

/// Environment variable checked for the master passphrase (scripts/CI).
pub const PASSPHRASE_ENV: &str = "PASSVAULT_PASSPHRASE";

/// PassVault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the vault files (default: data)
    #[arg(long, global = true, env = "PASSVAULT_DATA_DIR")]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault and choose the master passphrase
    Init,

    /// Save credentials for a service (add or overwrite)
    Save {
        /// Service name (e.g. github)
        service: String,
        /// Login for the service (omit for interactive prompt)
        #[arg(short, long)]
        login: Option<String>,
    },

    /// Show the login and password stored for a service
    Get {
        /// Service name
        service: String,
    },

    /// List all services in the vault
    List,

    /// Delete the credentials of a service
    Delete {
        /// Service name
        service: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved project directory and settings for one invocation.
pub struct Context {
    pub project_dir: PathBuf,
    pub settings: Settings,
}

impl Context {
    /// Load `.passvault.toml` from the current directory and apply
    /// command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let project_dir = std::env::current_dir()?;
        let mut settings = Settings::load(&project_dir)?;
        if let Some(dir) = &cli.data_dir {
            settings.data_dir = dir.clone();
        }
        Ok(Self {
            project_dir,
            settings,
        })
    }

    pub fn vault_paths(&self) -> VaultPaths {
        self.settings.vault_paths(&self.project_dir)
    }

    pub fn data_path(&self) -> PathBuf {
        self.settings.data_path(&self.project_dir)
    }

    /// The audit sink for this invocation (disabled if unavailable).
    pub fn audit(&self) -> Box<dyn AuditSink> {
        audit::open_or_disabled(&self.settings.audit_path(&self.project_dir))
    }
}

/// Pick the passphrase source:
/// 1. `PASSVAULT_PASSPHRASE` env var (one attempt, no re-prompt)
/// 2. Interactive prompt
pub fn passphrase_provider() -> Box<dyn PassphraseProvider> {
    match std::env::var(PASSPHRASE_ENV) {
        Ok(pw) if !pw.is_empty() => Box::new(StaticPassphrase::new(pw)),
        _ => Box::new(PromptPassphrase),
    }
}

/// Unlock the existing vault, refusing to silently create a new one.
///
/// Corrupt layouts are left to `Vault::open`, which audits them.
pub fn open_existing(ctx: &Context) -> Result<Vault> {
    let paths = ctx.vault_paths();
    if matches!(OpenMode::detect(&paths), Ok(OpenMode::CreateNew)) {
        output::tip("Run `passvault init` to create a vault.");
        return Err(VaultError::CommandFailed(format!(
            "no vault found at {}",
            paths.vault.display()
        )));
    }

    let mut provider = passphrase_provider();
    Vault::open(paths, provider.as_mut(), ctx.audit())
}
