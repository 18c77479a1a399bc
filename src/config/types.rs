//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_host, default_ident, default_log_level, default_realname};
use crate::casemap::Casemapping;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tracker configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Default log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// The local identity.
    pub identity: IdentityConfig,
    /// Index behaviour.
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Minimal configuration for a local identity called `nick`.
    pub fn for_nick(nick: &str) -> Self {
        Self {
            log_level: default_log_level(),
            identity: IdentityConfig {
                nick: nick.to_string(),
                ident: default_ident(),
                host: default_host(),
                realname: default_realname(),
            },
            tracking: TrackingConfig::default(),
        }
    }
}

/// Who we are on the network.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub nick: String,
    #[serde(default = "default_ident")]
    pub ident: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_realname")]
    pub realname: String,
}

/// How names are indexed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackingConfig {
    /// Case mapping for nick and channel index keys (default: strict).
    #[serde(default)]
    pub casemapping: Casemapping,
}
