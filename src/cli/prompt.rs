//! Terminal passphrase prompts.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::errors::{Result, VaultError};
use crate::vault::PassphraseProvider;

/// Passphrases shorter than this get a warning (not an error).
const RECOMMENDED_MIN_LEN: usize = 8;

/// Reads passphrases from the terminal with hidden input.
pub struct PromptPassphrase;

fn read_hidden(prompt: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

impl PassphraseProvider for PromptPassphrase {
    fn passphrase(&mut self) -> Result<Zeroizing<String>> {
        read_hidden("Enter master passphrase")
    }

    fn new_passphrase(&mut self) -> Result<(Zeroizing<String>, Zeroizing<String>)> {
        let passphrase = read_hidden("Create master passphrase")?;
        if !passphrase.is_empty() && passphrase.chars().count() < RECOMMENDED_MIN_LEN {
            output::warning(&format!(
                "Passphrases shorter than {RECOMMENDED_MIN_LEN} characters are easy to guess."
            ));
        }
        let confirmation = read_hidden("Repeat master passphrase")?;
        Ok((passphrase, confirmation))
    }

    fn rejected(&mut self, error: &VaultError) -> Result<()> {
        output::warning(&format!("{error}. Try again."));
        Ok(())
    }
}
