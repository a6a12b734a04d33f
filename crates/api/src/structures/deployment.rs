//! Deployment records

use chrono::{DateTime, Utc};
use serde::Serialize;
use squarecloud_domain::{ApiDeployment, DeploymentState};

/// One GitHub-triggered deployment of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub id: String,
    pub application_id: String,
    pub state: DeploymentState,
    pub created_at: Option<DateTime<Utc>>,
    pub created_timestamp: Option<i64>,
}

impl Deployment {
    pub(crate) fn from_api(application_id: &str, data: ApiDeployment) -> Self {
        let created_at = data.date.to_datetime();

        Self {
            id: data.id,
            application_id: application_id.to_string(),
            state: data.state,
            created_at,
            created_timestamp: created_at.map(|at| at.timestamp_millis()),
        }
    }
}
