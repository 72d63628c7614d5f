//! Secure storage for the API key.
//!
//! The credential lives apart from the non-secret configuration, behind a
//! small capability trait so any platform's secure-storage primitive can be
//! substituted without touching the session layer. The value must never be
//! logged and never leaves the process except as an `X-API-KEY` header.

use std::sync::Mutex;

use crate::error::StoreError;

const KEYRING_SERVICE: &str = "quill";
const KEYRING_ACCOUNT: &str = "api-key";

/// Capability interface over a secret store.
pub trait CredentialVault: Send + Sync {
    /// Replaces any previously stored key.
    fn save(&self, api_key: &str) -> Result<(), StoreError>;

    /// Returns the stored key, or `None` when absent. A store that cannot
    /// be read counts as absent — never fatal.
    fn load(&self) -> Option<String>;

    /// Deletes the entry if present; a missing entry is a no-op.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Vault backed by the operating system keychain, which encrypts at rest
/// and scopes access to this application.
pub struct KeyringVault {
    service: String,
    account: String,
}

impl KeyringVault {
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            account: KEYRING_ACCOUNT.to_string(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, StoreError> {
        keyring::Entry::new(&self.service, &self.account)
            .map_err(|e| StoreError::Credential(e.to_string()))
    }
}

impl Default for KeyringVault {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialVault for KeyringVault {
    fn save(&self, api_key: &str) -> Result<(), StoreError> {
        let entry = self.entry()?;
        // Remove any previous entry first; some platform stores reject a
        // second add for the same service/account pair.
        let _ = entry.delete_credential();
        entry
            .set_password(api_key)
            .map_err(|e| StoreError::Credential(e.to_string()))
    }

    fn load(&self) -> Option<String> {
        let entry = self.entry().ok()?;
        entry.get_password().ok()
    }

    fn clear(&self) -> Result<(), StoreError> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::Credential(e.to_string())),
        }
    }
}

/// Process-local vault for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryVault {
    secret: Mutex<Option<String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialVault for MemoryVault {
    fn save(&self, api_key: &str) -> Result<(), StoreError> {
        let mut secret = self
            .secret
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *secret = Some(api_key.to_string());
        Ok(())
    }

    fn load(&self) -> Option<String> {
        self.secret
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut secret = self
            .secret
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *secret = None;
        Ok(())
    }
}
