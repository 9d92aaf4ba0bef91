//! Saved login credentials, kept in the OS keychain rather than on disk.
//! The keychain entry is keyed by service name + email, so several accounts
//! can coexist on one machine.

// Allow dead code: Infrastructure methods for future use
#![allow(dead_code)]

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "canvass";

pub struct CredentialStore;

impl CredentialStore {
    fn entry(email: &str) -> Result<Entry> {
        Entry::new(SERVICE_NAME, email).context("Failed to open keyring entry")
    }

    /// Whether a password is saved for this email.
    pub fn has_credentials(email: &str) -> bool {
        Self::entry(email)
            .map(|e| e.get_password().is_ok())
            .unwrap_or(false)
    }

    pub fn get_password(email: &str) -> Result<String> {
        Self::entry(email)?
            .get_password()
            .context("Failed to read password from keychain")
    }

    pub fn store(email: &str, password: &str) -> Result<()> {
        Self::entry(email)?
            .set_password(password)
            .context("Failed to save password to keychain")
    }

    /// Forget the saved password for this email.
    pub fn delete(email: &str) -> Result<()> {
        Self::entry(email)?
            .delete_credential()
            .context("Failed to remove password from keychain")
    }
}
