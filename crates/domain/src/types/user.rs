//! Payload of the current-user endpoint

use serde::{Deserialize, Serialize};

use super::enums::ApplicationLanguage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUserInfo {
    pub user: ApiUser,
    pub applications: Vec<ApiUserApplication>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub name: String,
    /// Present for keys with full account access; may be `"Access denied"`
    #[serde(default)]
    pub email: Option<String>,
    pub plan: ApiUserPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUserPlan {
    pub name: String,
    pub memory: ApiPlanMemory,
    /// Expiry as epoch milliseconds; absent for plans without expiry
    #[serde(default)]
    pub duration: Option<i64>,
}

/// Plan memory in megabytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPlanMemory {
    pub limit: u64,
    pub available: u64,
    pub used: u64,
}

/// Application summary embedded in the user payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUserApplication {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    pub ram: u64,
    pub lang: ApplicationLanguage,
    pub cluster: String,
}
