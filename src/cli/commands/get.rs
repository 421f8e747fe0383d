//! `passvault get`: decrypt and print the credentials of a service.

use crate::cli::output;
use crate::cli::{open_existing, Cli, Context};
use crate::errors::{Result, VaultError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, service: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut vault = open_existing(&ctx)?;

    let credential = vault.get(service);
    vault.close()?;

    match credential? {
        Some(c) => {
            println!("Service:  {service}");
            println!("Login:    {}", c.login);
            println!("Password: {}", c.password);
            Ok(())
        }
        None => {
            output::tip("Run `passvault list` to see stored services.");
            Err(VaultError::CommandFailed(format!(
                "no credentials stored for '{service}'"
            )))
        }
    }
}
