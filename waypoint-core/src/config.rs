//! Runtime configuration: backend mode selection plus per-backend settings.
//!
//! Deserializable from TOML and readable from the environment. The mode is
//! consulted exactly once, when the facade constructs the active backend.

use serde::{Deserialize, Serialize};

/// Which backend implementation is active for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    #[default]
    Local,
    Remote,
}

/// Embedded store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/waypoint.sqlite".to_string(),
        }
    }
}

/// Remote proxy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the remote facts service. Required in remote mode;
    /// calls fail with `BackendUnavailable` while unset.
    pub base_url: Option<String>,
    /// Optional bearer credential attached to every call.
    pub auth_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the initial attempt, for transport errors and 5xx only.
    pub max_retries: u32,
    /// Base backoff between retries, in milliseconds (jitter is added).
    pub backoff_base_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_key: None,
            timeout_secs: 30,
            max_retries: 2,
            backoff_base_ms: 250,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub mode: BackendMode,
    pub store: StoreConfig,
    pub remote: RemoteConfig,
}

impl WaypointConfig {
    /// Parse from a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Build from environment variables, falling back to defaults:
    /// `WAYPOINT_BACKEND_MODE` (local|remote), `WAYPOINT_DB_FILE`,
    /// `WAYPOINT_REMOTE_URL`, `WAYPOINT_AUTH_KEY`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(mode) = std::env::var("WAYPOINT_BACKEND_MODE") {
            if mode.eq_ignore_ascii_case("remote") {
                config.mode = BackendMode::Remote;
            }
        }
        if let Ok(path) = std::env::var("WAYPOINT_DB_FILE") {
            config.store.db_path = path;
        }
        if let Ok(url) = std::env::var("WAYPOINT_REMOTE_URL") {
            config.remote.base_url = Some(url);
        }
        if let Ok(key) = std::env::var("WAYPOINT_AUTH_KEY") {
            config.remote.auth_key = Some(key);
        }
        config
    }
}
