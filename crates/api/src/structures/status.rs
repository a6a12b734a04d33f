//! Application status objects

use chrono::{DateTime, Utc};
use serde::Serialize;
use squarecloud_domain::{
    ApiApplicationStatus, ApiStatusAllEntry, ApiStatusNetwork, ApplicationState, Result,
};
use squarecloud_infra::{routes, RequestOptions};
use tracing::instrument;

use crate::session::Session;

/// Resource usage reported by the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUsage {
    pub cpu: String,
    pub ram: String,
    pub network: ApiStatusNetwork,
    pub storage: String,
}

/// Full status of one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationStatus {
    /// Application this status was fetched for
    pub application_id: String,
    pub usage: StatusUsage,
    pub running: bool,
    pub status: ApplicationState,
    /// Requests served since the last start
    pub requests: u64,
    /// Start time of the current run
    pub uptime: Option<DateTime<Utc>>,
    /// `uptime` in epoch milliseconds, as sent by the API
    pub uptime_timestamp: Option<i64>,
}

impl ApplicationStatus {
    pub(crate) fn from_api(application_id: impl Into<String>, data: ApiApplicationStatus) -> Self {
        let ApiApplicationStatus { cpu, ram, status, running, storage, network, requests, uptime } =
            data;

        Self {
            application_id: application_id.into(),
            usage: StatusUsage { cpu, ram, network, storage },
            running,
            status,
            requests,
            uptime: uptime.and_then(DateTime::from_timestamp_millis),
            uptime_timestamp: uptime,
        }
    }

    /// Rebuild the wire payload from the derived fields.
    pub fn to_api(&self) -> ApiApplicationStatus {
        ApiApplicationStatus {
            cpu: self.usage.cpu.clone(),
            ram: self.usage.ram.clone(),
            status: self.status,
            running: self.running,
            storage: self.usage.storage.clone(),
            network: self.usage.network.clone(),
            requests: self.requests,
            uptime: self.uptime.map(|at| at.timestamp_millis()),
        }
    }
}

/// CPU and RAM of a running application, from the bulk status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleStatusUsage {
    pub cpu: String,
    pub ram: String,
}

/// Entry of the all-applications status listing
#[derive(Debug, Clone)]
pub struct SimpleApplicationStatus {
    session: Session,
    pub application_id: String,
    pub running: bool,
    /// Present only while the application runs
    pub usage: Option<SimpleStatusUsage>,
}

impl SimpleApplicationStatus {
    pub(crate) fn from_api(session: Session, data: ApiStatusAllEntry) -> Self {
        let usage = match (data.running, data.cpu, data.ram) {
            (true, Some(cpu), Some(ram)) => Some(SimpleStatusUsage { cpu, ram }),
            _ => None,
        };

        Self { session, application_id: data.id, running: data.running, usage }
    }

    /// Fetch the full status of this application.
    #[instrument(skip(self), fields(app_id = %self.application_id))]
    pub async fn fetch(&self) -> Result<ApplicationStatus> {
        let data = self
            .session
            .fetch(routes::apps::status(&self.application_id), RequestOptions::new())
            .await?;

        Ok(ApplicationStatus::from_api(&self.application_id, data))
    }
}

#[cfg(test)]
mod tests {
    use squarecloud_domain::ApiStatusNetwork;

    use super::*;

    fn payload(uptime: Option<i64>) -> ApiApplicationStatus {
        ApiApplicationStatus {
            cpu: "1%".into(),
            ram: "10%".into(),
            status: ApplicationState::Running,
            running: true,
            storage: "0".into(),
            network: ApiStatusNetwork { total: "0".into(), now: "0".into() },
            requests: 0,
            uptime,
        }
    }

    #[test]
    fn uptime_round_trips_through_datetime() {
        let original = payload(Some(1_700_000_000_123));
        let status = ApplicationStatus::from_api("abc", original.clone());

        assert_eq!(status.uptime.map(|at| at.timestamp_millis()), Some(1_700_000_000_123));
        assert_eq!(status.uptime_timestamp, Some(1_700_000_000_123));
        assert_eq!(status.to_api(), original);
    }

    #[test]
    fn missing_uptime_stays_missing() {
        let status = ApplicationStatus::from_api("abc", payload(None));
        assert!(status.uptime.is_none());
        assert_eq!(status.to_api().uptime, None);
    }
}
