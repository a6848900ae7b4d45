//! Configuration loaded from `taller.toml`
//!
//! Every section and field has a default, so an absent file or a partial
//! one both work.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::credentials::CredentialSource;
use crate::layout::SheetLayout;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "taller.toml";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid [credentials] section: {0}")]
    Credentials(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TallerConfig {
    pub store: StoreConfig,
    pub credentials: Option<CredentialConfig>,
    pub layout: SheetLayout,
    pub gate: GateConfig,
    pub server: ServerConfig,
}

/// The sheet document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the sheet file; also its document identifier
    pub document: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("tickets.csv"),
        }
    }
}

/// Where the service account comes from; exactly one of the two
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// TOML secrets file with a `[gcp_service_account]` table
    pub secrets: Option<PathBuf>,
    /// Service-account JSON file
    pub file: Option<PathBuf>,
}

impl CredentialConfig {
    pub fn source(&self) -> Result<CredentialSource, ConfigError> {
        match (&self.secrets, &self.file) {
            (Some(path), None) => Ok(CredentialSource::Secrets(path.clone())),
            (None, Some(path)) => Ok(CredentialSource::File(path.clone())),
            (Some(_), Some(_)) => Err(ConfigError::Credentials(
                "set either `secrets` or `file`, not both".to_string(),
            )),
            (None, None) => Err(ConfigError::Credentials(
                "one of `secrets` or `file` is required".to_string(),
            )),
        }
    }
}

/// Shared passphrase in front of the web form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub passphrase: Option<String>,
}

/// HTTP listener
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Seconds the save confirmation stays up before the ticket reloads
    pub confirm_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            confirm_seconds: 2,
        }
    }
}

impl TallerConfig {
    /// Parse configuration text
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        if let Some(credentials) = &config.credentials {
            credentials.source()?;
        }
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Credential source, when credentials are configured
    pub fn credential_source(&self) -> Result<Option<CredentialSource>, ConfigError> {
        self.credentials.as_ref().map(|c| c.source()).transpose()
    }
}
