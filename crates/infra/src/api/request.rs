//! Request options and body encoding

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::RequestBuilder;
use serde::Serialize;
use squarecloud_domain::Result;

use crate::errors::InfraError;

/// Body types a route may declare
pub trait IntoRequestBody {
    /// The body sets `Content-Type` itself; a caller-supplied one is dropped.
    const SETS_CONTENT_TYPE: bool = false;

    /// Attach the body to `builder`, setting any content headers it needs.
    fn apply(self, builder: RequestBuilder) -> Result<RequestBuilder>;
}

/// Routes without a body.
impl IntoRequestBody for () {
    fn apply(self, builder: RequestBuilder) -> Result<RequestBuilder> {
        Ok(builder)
    }
}

/// JSON object body, sent with `Content-Type: application/json`
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoRequestBody for Json<T> {
    const SETS_CONTENT_TYPE: bool = true;

    fn apply(self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let bytes = serde_json::to_vec(&self.0).map_err(InfraError::from)?;
        Ok(builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json")).body(bytes))
    }
}

/// Binary payloads pass through untouched.
impl IntoRequestBody for Vec<u8> {
    fn apply(self, builder: RequestBuilder) -> Result<RequestBuilder> {
        Ok(builder.body(self))
    }
}

/// Multipart forms carry their own boundary content type.
impl IntoRequestBody for Form {
    const SETS_CONTENT_TYPE: bool = true;

    fn apply(self, builder: RequestBuilder) -> Result<RequestBuilder> {
        Ok(builder.multipart(self))
    }
}

/// Per-call options: query parameters, body and header overrides
///
/// The HTTP method is fixed by the route.
#[derive(Debug)]
pub struct RequestOptions<B> {
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<B>,
    pub(crate) headers: HeaderMap,
}

impl<B> RequestOptions<B> {
    pub fn new() -> Self {
        Self { query: Vec::new(), body: None, headers: HeaderMap::new() }
    }

    /// Append a query parameter; values are percent-encoded when the URL is built.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header; `Authorization` is always replaced by the client key.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }
}

impl<B> Default for RequestOptions<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestOptions<Json<T>> {
    /// Shorthand for `body(Json(value))`.
    pub fn json(self, value: T) -> Self {
        self.body(Json(value))
    }
}
