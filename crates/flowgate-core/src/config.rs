//! Configuration for flowgate clients.
//!
//! Resolution order: command-line flags → environment variables → config file → defaults.
//! Flags are applied by the CLI; this module handles the rest.
//!
//! Config file location:
//!   1. $FLOWGATE_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/flowgate/config.toml
//!   3. ~/.config/flowgate/config.toml
//!
//! A missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowgateConfig {
    pub broker: BrokerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Gateway base URL, e.g. "http://127.0.0.1:26500".
    pub address: String,
    /// Deadline for one whole request, connect included.
    pub request_timeout_secs: u64,
    /// Deadline for establishing the TCP connection.
    pub connect_timeout_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:26500";

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl BrokerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// A zero deadline would fail every send as if the broker were down.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("request_timeout_secs"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("connect_timeout_secs"));
        }
        Ok(())
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("flowgate")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("invalid value for {0}: '{1}'")]
    InvalidEnv(&'static str, String),
    #[error("{0} must be at least 1 second")]
    ZeroTimeout(&'static str),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl FlowgateConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::file_path())
    }

    /// Load from an explicit path, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("FLOWGATE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(FlowgateConfig::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))
    }

    /// Apply FLOWGATE_* overrides. `lookup` stands in for `std::env::var`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FLOWGATE_ADDRESS") {
            self.broker.address = v;
        }
        // The long form wins when both are set.
        if let Some(v) = lookup("FLOWGATE_BROKER__ADDRESS") {
            self.broker.address = v;
        }
        if let Some(v) = lookup("FLOWGATE_BROKER__REQUEST_TIMEOUT_SECS") {
            self.broker.request_timeout_secs = v
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("FLOWGATE_BROKER__REQUEST_TIMEOUT_SECS", v))?;
        }
        if let Some(v) = lookup("FLOWGATE_BROKER__CONNECT_TIMEOUT_SECS") {
            self.broker.connect_timeout_secs = v
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("FLOWGATE_BROKER__CONNECT_TIMEOUT_SECS", v))?;
        }
        Ok(())
    }
}
