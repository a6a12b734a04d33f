use serde::{Deserialize, Serialize};

use super::api::ApiDate;
use super::enums::DeploymentState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDeployment {
    pub id: String,
    pub state: DeploymentState,
    pub date: ApiDate,
}

/// `{ webhook }` returned by the webhook endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiWebhook {
    pub webhook: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubWebhookBody {
    pub access_token: String,
}
