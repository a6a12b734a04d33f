//! Wire types as the API sends and receives them
//!
//! Field names follow the JSON payloads; the SDK-facing objects that wrap
//! these live in the api crate.

pub mod api;
pub mod application;
pub mod backup;
pub mod deployment;
pub mod enums;
pub mod files;
pub mod network;
pub mod status;
pub mod user;

pub use api::*;
pub use application::*;
pub use backup::*;
pub use deployment::*;
pub use enums::*;
pub use files::*;
pub use network::*;
pub use status::*;
pub use user::*;
