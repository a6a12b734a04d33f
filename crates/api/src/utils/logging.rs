//! Tracing setup

use squarecloud_domain::{Result, SquareCloudError};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "squarecloud=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a human-readable fmt subscriber filtered by `RUST_LOG`.
///
/// # Errors
/// Returns an `INVALID_CONFIG` error when a global subscriber is already set.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).try_init().map_err(|err| {
        SquareCloudError::config(format!("tracing subscriber already installed: {err}"))
    })
}

/// Same as [`init_tracing`] with JSON lines output.
///
/// # Errors
/// Returns an `INVALID_CONFIG` error when a global subscriber is already set.
pub fn init_json_tracing() -> Result<()> {
    tracing_subscriber::fmt().json().with_env_filter(env_filter()).try_init().map_err(|err| {
        SquareCloudError::config(format!("tracing subscriber already installed: {err}"))
    })
}
