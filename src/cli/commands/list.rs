//! `passvault list`: display all stored service names.

use crate::cli::output;
use crate::cli::{open_existing, Cli, Context};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut vault = open_existing(&ctx)?;

    let services = vault.list()?;
    vault.close()?;

    output::info(&format!("{} service(s)", services.len()));
    output::print_services_table(&services);

    Ok(())
}
