//! Persistence for the non-secret connection settings.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Port used when the user has never saved one.
pub const DEFAULT_PORT: u16 = 8081;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// The saved connection target. An empty host means "absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfiguration {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
        }
    }
}

/// File-backed store for [`ServerConfiguration`].
///
/// Both fields are written in a single file write, so a reader sees either
/// the previous pair or the new pair, never a mix. Anything unreadable on
/// disk loads as the defaults — a malformed file is not an error condition.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    path: PathBuf,
}

impl ConfigurationStore {
    /// Store under the platform config directory (`<config>/quill/config.toml`).
    pub fn new() -> Result<Self, StoreError> {
        let base = dirs::config_dir()
            .ok_or_else(|| StoreError::Config("no user config directory available".to_string()))?;
        Ok(Self {
            path: base.join("quill").join("config.toml"),
        })
    }

    /// Store at an explicit file path. Tests use this with a temp directory.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save(&self, host: &str, port: u16) -> Result<(), StoreError> {
        let config = ServerConfiguration {
            host: host.trim().to_string(),
            port,
        };
        let body = toml::to_string(&config).map_err(|e| StoreError::Config(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Config(e.to_string()))?;
        }
        fs::write(&self.path, body).map_err(|e| StoreError::Config(e.to_string()))?;
        log::debug!("saved server configuration to {}", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> ServerConfiguration {
        let Ok(body) = fs::read_to_string(&self.path) else {
            return ServerConfiguration::default();
        };
        match toml::from_str(&body) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("configuration file is malformed, using defaults: {}", e);
                ServerConfiguration::default()
            }
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Config(e.to_string())),
        }
    }
}
