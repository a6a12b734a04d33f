//! # Square Cloud Domain
//!
//! Wire-level types and the error taxonomy shared by every layer of the SDK.
//!
//! This crate contains:
//! - The single classified error type ([`SquareCloudError`]) and its code table
//! - Response envelope and payload DTOs as the API sends them
//! - Wire enums (application state, language, deployment state, file kind)
//! - Client configuration structure and defaults
//!
//! ## Architecture
//! - No dependencies on other SDK crates
//! - No I/O; pure data structures and conversions

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::ClientConfig;
pub use errors::*;
pub use types::*;
