//! Remote configuration
//!
//! Everything a remote needs besides the target identity has a default.
//! Values are layered: defaults, then an optional JSON file, then environment
//! variables, then whatever the binary applies from its command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sonos_api::{DeviceIdentity, DEFAULT_CONTROL_PORT};
use sonos_discovery::DiscoveryConfig;
use state_store::{JsonFileStore, StoreError};
use thiserror::Error;

/// Environment variable holding the target player's identity
pub const ENV_TARGET_UID: &str = "SONOS_TARGET_UID";

/// Environment variable holding the session cache file path
pub const ENV_CACHE_PATH: &str = "SONOS_CACHE_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for a remote
///
/// The JSON form uses millisecond integers for durations:
///
/// ```json
/// { "target_uid": "RINCON_000E58A0123456", "discovery_interval_ms": 300 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Identity of the player to control
    pub target_uid: String,

    /// Port of the UPnP control endpoints
    /// Default: 1400
    pub control_port: u16,

    /// Connect and read timeout of each SOAP call
    /// Default: 2 seconds
    #[serde(rename = "http_timeout_ms", with = "millis")]
    pub http_timeout: Duration,

    /// Number of M-SEARCH requests before giving up
    /// Default: 4
    pub discovery_attempts: u32,

    /// Listening window after each M-SEARCH
    /// Default: 250 milliseconds
    #[serde(rename = "discovery_interval_ms", with = "millis")]
    pub discovery_interval: Duration,

    /// Substring identifying a Sonos announcement
    /// Default: "Sonos"
    pub vendor_marker: String,

    /// MX header of the search request
    /// Default: 1
    pub search_mx: u8,

    /// Session cache file; the platform cache directory when unset
    pub cache_path: Option<PathBuf>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            target_uid: String::new(),
            control_port: DEFAULT_CONTROL_PORT,
            http_timeout: Duration::from_secs(2),
            discovery_attempts: 4,
            discovery_interval: Duration::from_millis(250),
            vendor_marker: "Sonos".to_string(),
            search_mx: 1,
            cache_path: None,
        }
    }
}

impl RemoteConfig {
    /// Defaults for controlling `target_uid`
    pub fn new(target_uid: impl Into<String>) -> Self {
        Self {
            target_uid: target_uid.into(),
            ..Default::default()
        }
    }

    /// `<config dir>/sonos-remote/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sonos-remote").join("config.json"))
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Apply `SONOS_TARGET_UID` and `SONOS_CACHE_PATH` from the process environment
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply environment-style overrides from `lookup`; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(uid) = lookup(ENV_TARGET_UID).filter(|v| !v.trim().is_empty()) {
            self.target_uid = uid.trim().to_string();
        }
        if let Some(path) = lookup(ENV_CACHE_PATH).filter(|v| !v.trim().is_empty()) {
            self.cache_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_uid.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "target identity is required (set target_uid or {})",
                ENV_TARGET_UID
            )));
        }

        if self.control_port == 0 {
            return Err(ConfigError::Invalid("Control port must be greater than 0".to_string()));
        }

        if self.http_timeout.is_zero() {
            return Err(ConfigError::Invalid("HTTP timeout must be greater than 0".to_string()));
        }

        if self.discovery_attempts == 0 {
            return Err(ConfigError::Invalid(
                "Discovery attempts must be greater than 0".to_string(),
            ));
        }

        if self.discovery_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "Discovery interval must be greater than 0".to_string(),
            ));
        }

        if self.vendor_marker.is_empty() {
            return Err(ConfigError::Invalid("Vendor marker must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.target_uid.trim())
    }

    /// Search settings for the discovery engine
    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            attempts: self.discovery_attempts,
            interval: self.discovery_interval,
            vendor_marker: self.vendor_marker.clone(),
            control_port: self.control_port,
            mx: self.search_mx,
        }
    }

    /// The session cache at `cache_path`, or the default cache file
    pub fn open_store(&self) -> Result<JsonFileStore, StoreError> {
        match &self.cache_path {
            Some(path) => Ok(JsonFileStore::open(path)),
            None => JsonFileStore::open_default(),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
