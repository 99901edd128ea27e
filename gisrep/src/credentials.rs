//! Credential storage backed by the platform keyring
//!
//! Secrets never land in the config file. They are stored through
//! `keyring::Entry` keyed by (service-name, username), which maps to the
//! Keychain on macOS, the Credential Manager on Windows, and the Secret
//! Service on Linux.

use crate::{GisrepError, Result};
use std::fmt;

/// A username/secret pair used to authenticate against an issue tracker
#[derive(Clone)]
pub struct Credentials {
    /// Account username
    pub username: String,

    /// Account password or personal access token
    pub secret: String,
}

impl Credentials {
    /// Create a new credential pair
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Thin wrapper over the platform keyring for one service name
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
}

impl CredentialStore {
    /// Create a store for the given service name
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Service name this store is keyed under
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Fetch the secret stored for a username
    pub fn get(&self, username: &str) -> Result<String> {
        let entry = self.entry(username)?;
        match entry.get_password() {
            Ok(secret) => Ok(secret),
            Err(keyring::Error::NoEntry) => Err(GisrepError::Credential(format!(
                "password not found in keyring for '{}' (service '{}')",
                username, self.service
            ))),
            Err(e) => Err(GisrepError::Credential(e.to_string())),
        }
    }

    /// Store a secret for a username, replacing any previous one
    pub fn set(&self, username: &str, secret: &str) -> Result<()> {
        self.entry(username)?
            .set_password(secret)
            .map_err(|e| GisrepError::Credential(e.to_string()))
    }

    /// Remove the secret stored for a username
    pub fn delete(&self, username: &str) -> Result<()> {
        match self.entry(username)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(GisrepError::Credential(e.to_string())),
        }
    }

    fn entry(&self, username: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, username)
            .map_err(|e| GisrepError::Credential(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn use_mock_keyring() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
    }

    #[test]
    #[serial]
    fn test_secret_roundtrip() {
        use_mock_keyring();
        let store = CredentialStore::new("gisrep-test");

        store.set("alice", "hunter2").unwrap();
        assert_eq!(store.get("alice").unwrap(), "hunter2");

        store.delete("alice").unwrap();
        assert!(store.get("alice").is_err());
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_a_credential_error() {
        use_mock_keyring();
        let store = CredentialStore::new("gisrep-test");

        let err = store.get("nobody").unwrap_err();
        assert!(matches!(err, GisrepError::Credential(_)));
        assert!(err.to_string().contains("password not found"));
    }

    #[test]
    #[serial]
    fn test_set_replaces_previous_secret() {
        use_mock_keyring();
        let store = CredentialStore::new("gisrep-test");

        store.set("bob", "first").unwrap();
        store.set("bob", "second").unwrap();
        assert_eq!(store.get("bob").unwrap(), "second");
        store.delete("bob").unwrap();
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("alice", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
