use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use squarecloud_core::assert_string;
use squarecloud_domain::{
    codes, ApiPayload, ClientConfig, ErrorKind, RawEnvelope, Result, SquareCloudError,
};
use tracing::{debug, instrument, warn};
use url::Url;

use super::endpoint::{Endpoint, ResponseShape, Route};
use super::request::{IntoRequestBody, RequestOptions};
use crate::diagnostics;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Transport for one client instance
///
/// Holds the immutable API key; stateless between calls.
#[derive(Debug)]
pub struct ApiService {
    http: HttpClient,
    config: ClientConfig,
    base: Url,
    authorization: HeaderValue,
    user_id: String,
}

impl ApiService {
    /// Validate `config` and build the underlying HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        assert_string(&config.api_key, Some("API_KEY"))?;

        let base = Url::parse(&config.versioned_base()).map_err(InfraError::from)?;
        if base.cannot_be_a_base() {
            return Err(SquareCloudError::new(ErrorKind::InvalidInput, codes::INVALID_URL)
                .with_detail(format!("{base} cannot be used as a base URL")));
        }

        let mut authorization = HeaderValue::from_str(&config.api_key).map_err(InfraError::from)?;
        authorization.set_sensitive(true);

        let mut builder = HttpClient::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder.build()?;

        let user_id = config.api_key.split('-').next().unwrap_or_default().to_string();

        Ok(Self { http, config, base, authorization, user_id })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Account id: the API key up to its first `-`.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Absolute URL for `route` with `query` percent-encoded.
    pub fn build_url<E: Endpoint>(
        &self,
        route: &Route<E>,
        query: &[(String, String)],
    ) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                SquareCloudError::new(ErrorKind::InvalidInput, codes::INVALID_URL)
                    .with_detail("base URL has no path")
            })?
            .pop_if_empty()
            .extend(route.segments());

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Perform one API call and classify the outcome.
    ///
    /// 413, 429, 502 and 504 are mapped from the status alone. Otherwise the
    /// body must be JSON; an error envelope, an empty envelope or a non-2xx
    /// status becomes an application error carrying the envelope `code`.
    #[instrument(skip_all, fields(route = E::TEMPLATE, method = %E::METHOD))]
    pub async fn request<E: Endpoint>(
        &self,
        route: Route<E>,
        options: RequestOptions<E::Body>,
    ) -> Result<ApiPayload<E::Response>> {
        let url = self.build_url(&route, &options.query)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.extend(options.headers);
        headers.insert(AUTHORIZATION, self.authorization.clone());
        if options.body.is_some() && <E::Body as IntoRequestBody>::SETS_CONTENT_TYPE {
            headers.remove(CONTENT_TYPE);
        }

        let mut builder = self.http.request(E::METHOD, url).headers(headers);
        if let Some(body) = options.body {
            builder = body.apply(builder)?;
        }

        let response = self.http.send(builder).await.inspect_err(|err| {
            warn!(code = err.code(), error = %err, "API request failed before a response");
        })?;

        self.classify::<E>(response).await
    }

    async fn classify<E: Endpoint>(&self, response: Response) -> Result<ApiPayload<E::Response>> {
        let status = response.status();
        if let Some(err) = status_error(status) {
            warn!(status = status.as_u16(), code = err.code(), "API request rejected by status");
            return Err(err);
        }

        let text = response.text().await.map_err(InfraError::from)?;
        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!(status = status.as_u16(), error = %err, "API response is not valid JSON");
                diagnostics::record(
                    self.config.diagnostics_dir.as_deref(),
                    E::TEMPLATE,
                    status.as_u16(),
                    &text,
                )
                .await;
                return Err(SquareCloudError::parse(status.as_u16()));
            }
        };

        let envelope = envelope_of(value);
        let failed = match &envelope {
            None => true,
            Some(envelope) => envelope.is_error() || !status.is_success(),
        };
        if failed {
            let envelope = envelope.unwrap_or_default();
            let err =
                SquareCloudError::application(envelope.code, envelope.message, status.as_u16());
            warn!(status = status.as_u16(), code = err.code(), "API returned an error envelope");
            return Err(err);
        }

        let Some(envelope) = envelope else {
            return Err(SquareCloudError::application(None, None, status.as_u16()));
        };
        let api_status = envelope.api_status();
        let response = match envelope.response {
            None | Some(Value::Null) => None,
            Some(value) => Some(<E::Response as ResponseShape>::decode(value, E::TEMPLATE)?),
        };

        debug!(
            status = status.as_u16(),
            has_response = response.is_some(),
            "API request succeeded"
        );
        Ok(ApiPayload {
            status: api_status,
            code: envelope.code,
            message: envelope.message,
            response,
        })
    }

    /// Fetch raw bytes from an absolute URL without API credentials.
    ///
    /// Used for signed storage links such as backup archives.
    #[instrument(skip_all)]
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url).map_err(InfraError::from)?;
        let response = self.http.send(self.http.request(reqwest::Method::GET, url)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status)
                .unwrap_or_else(|| SquareCloudError::application(None, None, status.as_u16())));
        }

        let bytes = response.bytes().await.map_err(InfraError::from)?;
        debug!(size = bytes.len(), "download finished");
        Ok(bytes.to_vec())
    }
}

/// Statuses classified before the body is read.
fn status_error(status: StatusCode) -> Option<SquareCloudError> {
    match status.as_u16() {
        413 => Some(SquareCloudError::payload_too_large()),
        429 => Some(SquareCloudError::rate_limited()),
        code @ (502 | 504) => Some(SquareCloudError::server_unavailable(code)),
        _ => None,
    }
}

/// `None` when the body is not an object or is an empty object.
///
/// Fields are read one by one; a `status`, `code` or `message` that is not a
/// string is treated as absent instead of discarding the envelope.
fn envelope_of(value: Value) -> Option<RawEnvelope> {
    let Value::Object(mut map) = value else {
        return None;
    };
    if map.is_empty() {
        return None;
    }

    let text = |value: Option<Value>| match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    };
    Some(RawEnvelope {
        status: text(map.remove("status")),
        code: text(map.remove("code")),
        message: text(map.remove("message")),
        response: map.remove("response"),
    })
}
