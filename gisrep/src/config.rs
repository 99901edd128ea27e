//! Config file management
//!
//! The config file is TOML at `~/.gisreprc` and records only non-secret
//! identifiers: the GitHub username and the keyring service name used to
//! look the secret up. It is created once by `gisrep init` and read on each
//! subsequent invocation; an existing file is only replaced when `force` is
//! given.

use crate::{CredentialStore, Credentials, GisrepError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name, placed in the home directory
pub const CONFIG_FILE_NAME: &str = ".gisreprc";

/// Keyring service name secrets are stored under
pub const PASSWORD_SERVICE_NAME: &str = "gisrep";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    github: GithubSection,
}

/// The `[github]` section of the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubSection {
    /// GitHub account username
    pub username: String,

    /// Keyring service name the secret is stored under
    pub password_service: String,
}

/// Config file content abstraction
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    content: ConfigFile,
}

impl Config {
    /// Default config file path, `~/.gisreprc`
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                GisrepError::Config("could not determine the home directory".to_string())
            })
    }

    /// Create a new config file, storing the secret in the keyring
    ///
    /// Fails if a config file already exists at `path` unless `force` is
    /// given, in which case the previous content is replaced.
    pub fn create(path: impl AsRef<Path>, credentials: &Credentials, force: bool) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() && !force {
            return Err(GisrepError::ConfigExists(path.to_path_buf()));
        }

        let store = CredentialStore::new(PASSWORD_SERVICE_NAME);
        store.set(&credentials.username, &credentials.secret)?;

        let content = ConfigFile {
            github: GithubSection {
                username: credentials.username.clone(),
                password_service: PASSWORD_SERVICE_NAME.to_string(),
            },
        };

        let config = Self {
            path: path.to_path_buf(),
            content,
        };
        config.write()?;
        Ok(config)
    }

    /// Load an existing config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GisrepError::ConfigNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let content: ConfigFile = toml::from_str(&raw)?;

        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    /// Stored GitHub username
    pub fn username(&self) -> &str {
        &self.content.github.username
    }

    /// Config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up the full credentials, fetching the secret from the keyring
    pub fn credentials(&self) -> Result<Credentials> {
        let store = CredentialStore::new(&self.content.github.password_service);
        let secret = store.get(&self.content.github.username)?;
        Ok(Credentials::new(&self.content.github.username, secret))
    }

    fn write(&self) -> Result<()> {
        let raw = toml::to_string_pretty(&self.content)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}
