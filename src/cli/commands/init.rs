//! `passvault init`: create a new vault and its master passphrase.

use std::fs;

use crate::cli::output;
use crate::cli::{passphrase_provider, Cli, Context};
use crate::errors::{Result, VaultError};
use crate::vault::{OpenMode, Vault};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let paths = ctx.vault_paths();

    // 1. Refuse to touch an existing vault.
    if OpenMode::detect(&paths)? == OpenMode::VerifyExisting {
        output::tip("Use `passvault save` to add credentials to the existing vault.");
        return Err(VaultError::CommandFailed(format!(
            "vault already exists at {}",
            paths.vault.display()
        )));
    }

    // 2. Create the data directory so the audit log can live there too.
    let data_dir = ctx.data_path();
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
        output::info(&format!("Created vault directory: {}", data_dir.display()));
    }

    // 3. Choose the passphrase and write salt, digest and record store.
    let mut provider = passphrase_provider();
    let mut vault = Vault::open(paths, provider.as_mut(), ctx.audit())?;
    output::success(&format!(
        "Vault created at {}",
        vault.paths().vault.display()
    ));
    output::warning("Keep the salt file next to the vault. Without it nothing can be decrypted.");
    vault.close()?;

    output::tip("Run `passvault save <SERVICE>` to store credentials.");
    output::tip("Run `passvault list` to see all services.");

    Ok(())
}
