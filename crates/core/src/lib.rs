//! # Square Cloud Core
//!
//! In-memory building blocks of the SDK - no network or file I/O.
//!
//! This crate contains:
//! - Assertions for caller arguments and API payload shapes
//! - The closed-key cache service used by the client and each application
//! - The typed synchronous event emitter
//!
//! ## Architecture Principles
//! - Only depends on `squarecloud-domain`
//! - Every failure is a [`SquareCloudError`](squarecloud_domain::SquareCloudError)

pub mod assertions;
pub mod cache;
pub mod events;

pub use assertions::{
    assert_api_array, assert_api_object, assert_path_like, assert_string, decode_api_object,
    ApiObjectKind,
};
pub use cache::{CacheKey, CacheService, CacheView};
pub use events::{Event, EventChannel, EventEmitter, ListenerId};
