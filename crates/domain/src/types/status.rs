//! Status payloads

use serde::{Deserialize, Serialize};

use super::enums::ApplicationState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatusNetwork {
    pub total: String,
    pub now: String,
}

/// `apps/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiApplicationStatus {
    pub cpu: String,
    pub ram: String,
    pub status: ApplicationState,
    pub running: bool,
    pub storage: String,
    pub network: ApiStatusNetwork,
    pub requests: u64,
    /// Start time as epoch milliseconds
    #[serde(default)]
    pub uptime: Option<i64>,
}

/// One element of `apps/status`; usage is only present while running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatusAllEntry {
    pub id: String,
    pub running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
}

/// `apps/{id}/logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLogs {
    pub logs: String,
}
