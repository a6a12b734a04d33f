//! GitHub deployments of an application

use squarecloud_core::assert_string;
use squarecloud_domain::{GithubWebhookBody, Result};
use squarecloud_infra::{routes, RequestOptions};
use tracing::instrument;

use crate::structures::{Application, Deployment};

#[derive(Debug, Clone, Copy)]
pub struct DeploysModule<'a> {
    application: &'a Application,
}

impl<'a> DeploysModule<'a> {
    pub(crate) fn new(application: &'a Application) -> Self {
        Self { application }
    }

    /// Recent deployments of the application.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn list(&self) -> Result<Vec<Deployment>> {
        let id = &self.application.id;
        let data = self
            .application
            .session()
            .fetch(routes::apps::deployments::list(id), RequestOptions::new())
            .await?;

        Ok(data.into_iter().map(|deployment| Deployment::from_api(id, deployment)).collect())
    }

    /// Webhook URL of the current integration.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn current_webhook(&self) -> Result<String> {
        let data = self
            .application
            .session()
            .fetch(routes::apps::deployments::current(&self.application.id), RequestOptions::new())
            .await?;
        Ok(data.webhook)
    }

    /// Register a GitHub webhook using a personal access token.
    #[instrument(skip_all, fields(app_id = %self.application.id))]
    pub async fn integrate_github_webhook(&self, access_token: &str) -> Result<String> {
        assert_string(access_token, Some("GITHUB_ACCESS_TOKEN"))?;

        let body = GithubWebhookBody { access_token: access_token.to_string() };
        let data = self
            .application
            .session()
            .fetch(
                routes::apps::deployments::webhook(&self.application.id),
                RequestOptions::new().json(body),
            )
            .await?;
        Ok(data.webhook)
    }
}
