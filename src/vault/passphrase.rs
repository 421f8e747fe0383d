//! Where master passphrases come from.
//!
//! The vault never prompts on its own: it asks a `PassphraseProvider`,
//! so the lifecycle can be driven by a terminal prompt, a script, or a
//! test.

use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// A source of master passphrases.
pub trait PassphraseProvider {
    /// Ask for the passphrase of an existing vault.
    fn passphrase(&mut self) -> Result<Zeroizing<String>>;

    /// Ask for a new passphrase and its confirmation.
    fn new_passphrase(&mut self) -> Result<(Zeroizing<String>, Zeroizing<String>)>;

    /// Called when a supplied passphrase was refused.  Returning an
    /// error stops the verification loop with that error.
    fn rejected(&mut self, error: &VaultError) -> Result<()> {
        let _ = error;
        Ok(())
    }
}

/// A provider holding one fixed passphrase.
///
/// It answers exactly once; a rejection ends the attempt instead of
/// looping on the same value.
pub struct StaticPassphrase {
    value: Option<Zeroizing<String>>,
}

impl StaticPassphrase {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(Zeroizing::new(value.into())),
        }
    }

    fn take(&mut self) -> Result<Zeroizing<String>> {
        self.value.take().ok_or(VaultError::UserCancelled)
    }
}

impl PassphraseProvider for StaticPassphrase {
    fn passphrase(&mut self) -> Result<Zeroizing<String>> {
        self.take()
    }

    fn new_passphrase(&mut self) -> Result<(Zeroizing<String>, Zeroizing<String>)> {
        let value = self.take()?;
        let confirmation = value.clone();
        Ok((value, confirmation))
    }

    fn rejected(&mut self, error: &VaultError) -> Result<()> {
        Err(match error {
            VaultError::EmptyPassphrase => VaultError::EmptyPassphrase,
            _ => VaultError::WrongPassphrase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_passphrase_answers_once() {
        let mut provider = StaticPassphrase::new("p@ss");
        assert_eq!(provider.passphrase().unwrap().as_str(), "p@ss");
        assert!(matches!(
            provider.passphrase(),
            Err(VaultError::UserCancelled)
        ));
    }

    #[test]
    fn static_passphrase_confirms_itself() {
        let mut provider = StaticPassphrase::new("p@ss");
        let (first, second) = provider.new_passphrase().unwrap();
        assert_eq!(first.as_str(), second.as_str());
    }

    #[test]
    fn static_passphrase_stops_on_rejection() {
        let mut provider = StaticPassphrase::new("p@ss");
        let result = provider.rejected(&VaultError::WrongPassphrase);
        assert!(matches!(result, Err(VaultError::WrongPassphrase)));
    }
}
