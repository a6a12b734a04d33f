use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use squarecloud_domain::SquareCloudError;
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with optional timeout; every call is sent exactly once.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, SquareCloudError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// Any status code is returned as a response; only failures to obtain a
    /// response become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SquareCloudError> {
        let request = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            SquareCloudError::from(infra)
        })?;

        let method = request.method().clone();
        let url = redact(request.url());
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                let infra: InfraError = err.into();
                Err(SquareCloudError::from(infra))
            }
        }
    }
}

/// Strip the query so signed download keys never reach the logs.
fn redact(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpClientBuilder {
    /// Total request timeout; unset means the connection's own limits apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, SquareCloudError> {
        let mut builder = ReqwestClient::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            SquareCloudError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}
