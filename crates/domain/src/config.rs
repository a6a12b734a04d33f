//! Client configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_SNAPSHOTS_URL, USER_AGENT_PREFIX,
};

/// Settings for one SDK client instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Account API key sent as the `Authorization` header
    #[serde(skip_serializing)]
    pub api_key: String,
    /// API host without the version segment
    pub base_url: String,
    /// Version path segment placed between host and route
    pub api_version: String,
    /// Host serving backup archives
    pub snapshots_url: String,
    /// Request timeout; `None` leaves the connection to its own limits
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
    /// Where response bodies that fail to parse are written for inspection
    pub diagnostics_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Default configuration for the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Self::default() }
    }

    /// `<base_url>/<api_version>` without trailing slashes.
    pub fn versioned_base(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            snapshots_url: DEFAULT_SNAPSHOTS_URL.to_string(),
            timeout_secs: None,
            user_agent: format!("{}/{}", USER_AGENT_PREFIX, env!("CARGO_PKG_VERSION")),
            diagnostics_dir: None,
        }
    }
}
