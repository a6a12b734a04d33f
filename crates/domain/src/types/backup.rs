use serde::{Deserialize, Serialize};

use super::api::ApiDate;

/// Element of the snapshot listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiBackup {
    pub name: String,
    pub size: u64,
    pub modified: ApiDate,
    pub key: String,
}

/// Result of generating a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiBackupCreated {
    pub url: String,
    pub key: String,
}
