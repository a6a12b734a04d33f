//! Square Cloud REST transport
//!
//! A [`Route`] pairs a concrete path with an [`Endpoint`] marker that fixes
//! the HTTP method, the accepted body type and the decoded response type.
//! [`ApiService::request`] turns a route plus [`RequestOptions`] into one
//! HTTP exchange and classifies every failure into a
//! [`SquareCloudError`](squarecloud_domain::SquareCloudError).

pub mod endpoint;
pub mod request;
pub mod routes;
pub mod service;

pub use endpoint::{require_response, Endpoint, ResponseShape, Route};
pub use request::{IntoRequestBody, Json, RequestOptions};
pub use service::ApiService;
