//! Authenticated user

use chrono::{DateTime, Utc};
use squarecloud_domain::constants::ACCESS_DENIED_MARKER;
use squarecloud_domain::{ApiPlanMemory, ApiUser, ApiUserInfo, ApiUserPlan};

use super::application::Application;
use crate::session::Session;

/// What the API key may see of the account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAccess {
    /// Private fields were returned
    Full { email: String },
    Restricted,
}

/// Current subscription plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPlan {
    pub name: String,
    pub memory: ApiPlanMemory,
    /// Expiry in epoch milliseconds; `None` for plans that never expire
    pub expires_timestamp: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ApiUserPlan> for UserPlan {
    fn from(plan: ApiUserPlan) -> Self {
        Self {
            name: plan.name,
            memory: plan.memory,
            expires_timestamp: plan.duration,
            expires_at: plan.duration.and_then(DateTime::from_timestamp_millis),
        }
    }
}

/// Account behind the API key, with its applications
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub plan: UserPlan,
    pub access: UserAccess,
    /// Applications in listing order
    pub applications: Vec<Application>,
}

impl User {
    pub(crate) fn from_api(session: &Session, data: ApiUserInfo) -> Self {
        let ApiUserInfo { user: ApiUser { id, name, email, plan }, applications } = data;

        let access = match email {
            Some(email) if !email.trim().is_empty() && email != ACCESS_DENIED_MARKER => {
                UserAccess::Full { email }
            }
            _ => UserAccess::Restricted,
        };

        Self {
            id,
            name,
            plan: plan.into(),
            access,
            applications: applications
                .into_iter()
                .map(|app| Application::from_listing(session.clone(), app))
                .collect(),
        }
    }

    /// Whether private account fields were returned.
    pub fn has_access(&self) -> bool {
        matches!(self.access, UserAccess::Full { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match &self.access {
            UserAccess::Full { email } => Some(email),
            UserAccess::Restricted => None,
        }
    }

    /// Listed application with the given id.
    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.id == id)
    }
}
