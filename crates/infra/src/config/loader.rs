//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `SQUARECLOUD_API_KEY` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SQUARECLOUD_API_KEY`: API key (required)
//! - `SQUARECLOUD_BASE_URL`: API host
//! - `SQUARECLOUD_API_VERSION`: Version path segment
//! - `SQUARECLOUD_SNAPSHOTS_URL`: Backup download host
//! - `SQUARECLOUD_TIMEOUT_SECS`: Request timeout in seconds
//! - `SQUARECLOUD_DIAGNOSTICS_DIR`: Directory for unparsable response bodies
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./squarecloud.json` or `./squarecloud.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use squarecloud_domain::{ClientConfig, Result, SquareCloudError};
use url::Url;

const CONFIG_FILE_NAMES: [&str; 4] =
    ["squarecloud.json", "squarecloud.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the API key is
/// not set there, falls back to a config file.
///
/// # Errors
/// Returns an `INVALID_CONFIG` error if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The API key is missing or a value is out of range
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `SQUARECLOUD_API_KEY` is required; every other setting keeps its
/// default when unset.
///
/// # Errors
/// Returns an `INVALID_CONFIG` error if the key is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var("SQUARECLOUD_API_KEY")?);

    if let Some(base_url) = env_opt("SQUARECLOUD_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(version) = env_opt("SQUARECLOUD_API_VERSION") {
        config.api_version = version;
    }
    if let Some(snapshots_url) = env_opt("SQUARECLOUD_SNAPSHOTS_URL") {
        config.snapshots_url = snapshots_url;
    }
    if let Some(timeout) = env_opt("SQUARECLOUD_TIMEOUT_SECS") {
        let secs = timeout.parse::<u64>().map_err(|e| {
            SquareCloudError::config(format!("Invalid timeout seconds: {}", e))
        })?;
        config.timeout_secs = Some(secs);
    }
    if let Some(dir) = env_opt("SQUARECLOUD_DIAGNOSTICS_DIR") {
        config.diagnostics_dir = Some(PathBuf::from(dir));
    }

    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns an `INVALID_CONFIG` error if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The API key is missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SquareCloudError::config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SquareCloudError::config("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SquareCloudError::config(format!("Failed to read config file: {}", e)))?;

    validate(parse_config(&contents, &config_path)?)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SquareCloudError::config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SquareCloudError::config(format!("Invalid JSON format: {}", e))),
        _ => Err(SquareCloudError::config(format!("Unsupported config format: {}", extension))),
    }
}

/// Reject configurations the transport could never use.
fn validate(config: ClientConfig) -> Result<ClientConfig> {
    if config.api_key.trim().is_empty() {
        return Err(SquareCloudError::config("api_key is missing"));
    }
    let urls = [("base_url", &config.base_url), ("snapshots_url", &config.snapshots_url)];
    for (field, value) in urls {
        Url::parse(value)
            .map_err(|e| SquareCloudError::config(format!("Invalid {field}: {e}")))?;
    }
    if config.timeout_secs == Some(0) {
        return Err(SquareCloudError::config("timeout_secs must be greater than zero"));
    }
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns an `INVALID_CONFIG` error if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SquareCloudError::config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional, non-blank environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
