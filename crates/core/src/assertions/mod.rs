//! Runtime assertions
//!
//! Two tiers share the [`SquareCloudError`](squarecloud_domain::SquareCloudError)
//! vocabulary but not its codes:
//! - literal assertions guard caller arguments and fail with `INVALID_<ARG>`
//!   before any request is sent
//! - object assertions check decoded payloads against the shape declared for
//!   their route and fail with `API_CONTRACT_<KIND>:<route>`

mod literal;
mod objects;

pub use literal::{assert_path_like, assert_string};
pub use objects::{assert_api_array, assert_api_object, decode_api_object, ApiObjectKind};
