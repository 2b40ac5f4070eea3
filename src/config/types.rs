//! Raw configuration types for TOML parsing

use super::ConfigError;
use crate::registry::RemoteDescriptor;
use serde::Deserialize;

/// Raw configuration as parsed from TOML
#[derive(Debug, Deserialize, Default)]
pub struct RawConfig {
    #[serde(default)]
    pub remotes: Vec<RawRemote>,
    pub logging: Option<RawLoggingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RawRemote {
    pub alias: String,
    pub entry: String,
}

impl TryFrom<RawRemote> for RemoteDescriptor {
    type Error = ConfigError;

    fn try_from(raw: RawRemote) -> Result<Self, Self::Error> {
        if raw.alias.is_empty() {
            return Err(ConfigError::Invalid(
                "Remote alias must not be empty".to_string(),
            ));
        }
        if raw.entry.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "Remote {} has an empty entry URL",
                raw.alias
            )));
        }

        Ok(Self {
            alias: raw.alias,
            entry: raw.entry,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLoggingConfig {
    pub level: Option<String>,
}

/// Logging configuration consumed by the hosting process
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl From<RawLoggingConfig> for LoggingConfig {
    fn from(raw: RawLoggingConfig) -> Self {
        Self {
            level: raw.level.unwrap_or_else(|| "info".to_string()),
        }
    }
}
