//! Host configuration
//!
//! Loads the federation host's remote declarations from TOML files.

mod types;

pub use types::*;

use crate::registry::RemoteDescriptor;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main host configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remotes this host declares
    pub remotes: Vec<RemoteDescriptor>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let remotes = raw
            .remotes
            .into_iter()
            .map(RemoteDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for remote in &remotes {
            if !seen.insert(remote.alias.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Duplicate remote alias: {}",
                    remote.alias
                )));
            }
        }

        Ok(Self {
            remotes,
            logging: raw.logging.unwrap_or_default().into(),
        })
    }
}
