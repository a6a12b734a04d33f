//! Network settings of website applications

use serde_json::Value;
use squarecloud_core::assert_string;
use squarecloud_domain::{CustomDomainBody, DnsRecord, Result};
use squarecloud_infra::{routes, RequestOptions};
use tracing::instrument;

use crate::structures::Application;

/// Only reachable through [`WebsiteApplication::network`](crate::WebsiteApplication::network)
#[derive(Debug, Clone, Copy)]
pub struct NetworkModule<'a> {
    application: &'a Application,
}

impl<'a> NetworkModule<'a> {
    pub(crate) fn new(application: &'a Application) -> Self {
        Self { application }
    }

    /// Point a custom domain (e.g. `example.com`) at the website.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn set_custom_domain(&self, custom: &str) -> Result<bool> {
        assert_string(custom, Some("CUSTOM_DOMAIN"))?;

        let body = CustomDomainBody { custom: custom.to_string() };
        let payload = self
            .application
            .session()
            .call(
                routes::apps::network::custom(&self.application.id),
                RequestOptions::new().json(body),
            )
            .await?;
        Ok(payload.is_success())
    }

    /// Raw analytics of the custom domain; `Null` when none were returned.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn analytics(&self) -> Result<Value> {
        let payload = self
            .application
            .session()
            .call(routes::apps::network::analytics(&self.application.id), RequestOptions::new())
            .await?;
        Ok(payload.response.unwrap_or(Value::Null))
    }

    /// DNS records required by the custom domain.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn dns(&self) -> Result<Vec<DnsRecord>> {
        let payload = self
            .application
            .session()
            .call(routes::apps::network::dns(&self.application.id), RequestOptions::new())
            .await?;
        Ok(payload.response.unwrap_or_default())
    }
}
