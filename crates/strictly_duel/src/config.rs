//! Runtime configuration.
//!
//! Values come from a TOML file, then CLI flags override them. A missing
//! file is not an error; built-in defaults apply.

use crate::transport::Endpoint;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_duel.toml";

/// Settings for one host or guest process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct DuelConfig {
    /// Address the host dials or the guest binds.
    address: String,

    /// TCP port.
    port: u16,

    /// Username to use without prompting.
    #[setters(strip_option)]
    username: Option<String>,

    /// Seconds to wait on the peer before giving up; 0 waits forever.
    ///
    /// This bounds every read from the peer, so it also caps how long the
    /// other player may think: choosing a move, typing a username, or (on
    /// the guest) the host deciding on a rematch.
    peer_timeout_secs: u64,

    /// Seconds a single dial attempt may take.
    connect_timeout_secs: u64,

    /// Where tracing output goes.
    log_file: PathBuf,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
            username: None,
            peer_timeout_secs: 300,
            connect_timeout_secs: 10,
            log_file: PathBuf::from("strictly_duel.log"),
        }
    }
}

impl DuelConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(address = %config.address, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when `None`.
    ///
    /// A file that does not exist yields the defaults. A file that exists
    /// but cannot be read or parsed is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Address and port as an [`Endpoint`].
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.address.clone(), self.port)
    }

    /// Limit on waiting for the peer, `None` when disabled.
    ///
    /// Includes the peer's thinking time; see `peer_timeout_secs`.
    pub fn peer_timeout(&self) -> Option<Duration> {
        (self.peer_timeout_secs > 0).then(|| Duration::from_secs(self.peer_timeout_secs))
    }

    /// Limit on one dial attempt.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_disables_peer_timeout() {
        let config = DuelConfig::default().with_peer_timeout_secs(0u64);
        assert_eq!(config.peer_timeout(), None);
        assert_eq!(
            DuelConfig::default().peer_timeout(),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_overrides_apply() {
        let config = DuelConfig::default()
            .with_address("10.0.0.2")
            .with_port(6000u16)
            .with_username("alice");
        assert_eq!(config.endpoint().to_string(), "10.0.0.2:6000");
        assert_eq!(config.username().as_deref(), Some("alice"));
    }

    #[test]
    fn test_error_records_location() {
        let err = ConfigError::new("boom".to_string());
        assert!(err.file.ends_with("config.rs"));
        assert!(err.to_string().starts_with("Config error: boom"));
    }
}
