//! `passvault delete`: remove the credentials of a service.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_existing, Cli, Context};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, service: &str, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete credentials for '{service}'?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut vault = open_existing(&ctx)?;
    let removed = vault.delete(service)?;
    vault.close()?;

    if removed {
        output::success(&format!("Deleted credentials for '{service}'"));
    } else {
        output::info(&format!("Nothing stored for '{service}'."));
    }

    Ok(())
}
