//! `passvault save`: add or overwrite the credentials of a service.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_existing, Cli, Context};
use crate::errors::{Result, VaultError};

/// Execute the `save` command.
pub fn execute(cli: &Cli, service: &str, login: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;

    let login = match login {
        Some(l) => l.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt(format!("Login for {service}"))
            .interact_text()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?,
    };

    let password = if !io::stdin().is_terminal() {
        // Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Password for {service}"))
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    let mut vault = open_existing(&ctx)?;
    let existed = vault.contains(service)?;
    vault.save(service, &login, &password)?;
    vault.close()?;

    if existed {
        output::success(&format!("Credentials for '{service}' updated"));
    } else {
        output::success(&format!("Credentials for '{service}' saved"));
    }

    Ok(())
}
