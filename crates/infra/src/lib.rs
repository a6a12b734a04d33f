//! # Square Cloud Infrastructure
//!
//! Everything in the SDK that touches the network or the file system.
//!
//! This crate contains:
//! - The HTTP client wrapper over `reqwest`
//! - Typed routes and the request/response transport service
//! - Conversions from transport errors into the SDK error
//! - Configuration loading from environment and files
//! - Best-effort persistence of unparsable response bodies
//!
//! ## Architecture
//! - Depends on `squarecloud-domain` and `squarecloud-core`
//! - Contains all "impure" code (HTTP, file I/O)

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    require_response, routes, ApiService, Endpoint, IntoRequestBody, Json, RequestOptions,
    ResponseShape, Route,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
