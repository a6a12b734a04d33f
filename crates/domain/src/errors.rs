//! Error types used throughout the SDK
//!
//! Every failure path (local argument checks, network, body parsing, API
//! envelope errors, payload contract violations) ends in one
//! [`SquareCloudError`]. Consumers branch on [`SquareCloudError::code`] or
//! [`SquareCloudError::kind`]; the display message is derived from a static
//! code table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name reported by [`SquareCloudError::name`].
pub const ERROR_NAME: &str = "SquareCloudAPIError";

/// Stable error codes produced by the SDK itself.
///
/// Codes returned by the API are passed through verbatim and may be outside
/// this list.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const SERVER_UNAVAILABLE: &str = "SERVER_UNAVAILABLE";
    pub const CANNOT_PARSE_RESPONSE: &str = "CANNOT_PARSE_RESPONSE";
    pub const COMMON_ERROR: &str = "COMMON_ERROR";
    pub const APP_NOT_FOUND: &str = "APP_NOT_FOUND";
    pub const BACKUP_DOWNLOAD_FAILED: &str = "BACKUP_DOWNLOAD_FAILED";
    pub const CANNOT_READ_FILE: &str = "CANNOT_READ_FILE";
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
    pub const CONNECTION_FAILED: &str = "CONNECTION_FAILED";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const INVALID_URL: &str = "INVALID_URL";
    pub const INVALID_REQUEST_BODY: &str = "INVALID_REQUEST_BODY";

    /// Prefix for caller-argument failures (`INVALID_<ARG>`).
    pub const INVALID_PREFIX: &str = "INVALID_";
    /// Prefix for server payloads that break their declared shape.
    pub const CONTRACT_PREFIX: &str = "API_CONTRACT_";
}

/// Failure classes of the SDK error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller passed an argument that failed a literal assertion.
    InvalidInput,
    /// Server payload did not match the shape declared for its route.
    Contract,
    /// The network call itself failed (DNS, refused, reset, timeout).
    Transport,
    /// Response body was not valid JSON.
    Parse,
    /// Envelope reported an error, HTTP status was non-2xx, or body was empty.
    Application,
    /// HTTP 429.
    RateLimited,
    /// HTTP 502 / 504.
    Unavailable,
    /// HTTP 413.
    PayloadTooLarge,
}

impl ErrorKind {
    /// Whether retrying the same call later may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::Unavailable | Self::Transport)
    }

    /// Stable label suitable for logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::Contract => "contract",
            Self::Transport => "transport",
            Self::Parse => "parse",
            Self::Application => "application",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::PayloadTooLarge => "payload_too_large",
        }
    }
}

/// One structural difference between a payload and its expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMismatch {
    /// JSON pointer to the offending value (`""` for the root).
    pub path: String,
    /// What the shape required at that location.
    pub expected: String,
    /// The value actually received, rendered as JSON.
    pub actual: String,
}

/// The classified error returned by every SDK operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SquareCloudError {
    code: String,
    kind: ErrorKind,
    message: String,
    detail: Option<String>,
    status: Option<u16>,
    mismatches: Vec<FieldMismatch>,
}

impl SquareCloudError {
    /// Create an error with the given classification and code.
    pub fn new(kind: ErrorKind, code: impl Into<String>) -> Self {
        let code = code.into();
        let message = describe_code(&code).into_owned();
        Self { code, kind, message, detail: None, status: None, mismatches: Vec::new() }
    }

    /// Attach a human detail; it is appended to the display message.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message = format!("{}: {}", describe_code(&self.code), detail);
        self.detail = Some(detail);
        self
    }

    /// Attach the HTTP status that accompanied the failure.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the structural diff of a contract failure.
    pub fn with_mismatches(mut self, mismatches: Vec<FieldMismatch>) -> Self {
        self.mismatches = mismatches;
        self
    }

    /// Caller input failed a literal assertion.
    ///
    /// The code becomes `INVALID_<ARG>` or `VALIDATION_ERROR` when no argument
    /// code is supplied.
    pub fn invalid_input(argument: Option<&str>, detail: impl Into<String>) -> Self {
        let code = match argument {
            Some(arg) => format!("{}{}", codes::INVALID_PREFIX, arg),
            None => codes::VALIDATION_ERROR.to_string(),
        };
        Self::new(ErrorKind::InvalidInput, code).with_detail(detail)
    }

    /// Server payload broke the shape declared for `route`.
    pub fn contract(object: &str, route: &str, mismatches: Vec<FieldMismatch>) -> Self {
        let code = format!("{}{}:{}", codes::CONTRACT_PREFIX, object, route);
        let detail = match mismatches.len() {
            0 => format!("{object} payload from {route} is malformed"),
            1 => format!("{object} payload from {route} has 1 mismatch"),
            n => format!("{object} payload from {route} has {n} mismatches"),
        };
        Self::new(ErrorKind::Contract, code).with_detail(detail).with_mismatches(mismatches)
    }

    /// The network call failed before any response was received.
    pub fn transport(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, code).with_detail(detail)
    }

    /// The response body was not valid JSON.
    pub fn parse(status: u16) -> Self {
        Self::new(ErrorKind::Parse, codes::CANNOT_PARSE_RESPONSE)
            .with_detail(format!("Failed with status {status}"))
            .with_status(status)
    }

    /// The API reported an error, answered non-2xx, or sent an empty envelope.
    pub fn application(code: Option<String>, message: Option<String>, status: u16) -> Self {
        let code = code.filter(|c| !c.is_empty()).unwrap_or_else(|| codes::COMMON_ERROR.into());
        let error = Self::new(ErrorKind::Application, code).with_status(status);
        match message.filter(|m| !m.is_empty()) {
            Some(message) => error.with_detail(message),
            None => error,
        }
    }

    /// HTTP 429.
    pub fn rate_limited() -> Self {
        Self::new(ErrorKind::RateLimited, codes::RATE_LIMIT_EXCEEDED)
            .with_detail("Try again later")
            .with_status(429)
    }

    /// HTTP 502 or 504.
    pub fn server_unavailable(status: u16) -> Self {
        Self::new(ErrorKind::Unavailable, codes::SERVER_UNAVAILABLE)
            .with_detail("Try again later")
            .with_status(status)
    }

    /// HTTP 413.
    pub fn payload_too_large() -> Self {
        Self::new(ErrorKind::PayloadTooLarge, codes::PAYLOAD_TOO_LARGE).with_status(413)
    }

    /// Configuration could not be loaded or is inconsistent.
    pub fn config(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, codes::INVALID_CONFIG).with_detail(detail)
    }

    /// Always `"SquareCloudAPIError"`.
    pub fn name(&self) -> &'static str {
        ERROR_NAME
    }

    /// Machine-readable code.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Display message derived from the code table plus detail.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Structural diff for contract errors; empty otherwise.
    pub fn mismatches(&self) -> &[FieldMismatch] {
        &self.mismatches
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, SquareCloudError>;

/// Human description for an error code.
///
/// Unknown `INVALID_*` and `API_CONTRACT_*` codes fall back to their family
/// description; anything else is returned as the raw code.
pub fn describe_code(code: &str) -> Cow<'static, str> {
    let known = match code {
        codes::VALIDATION_ERROR => "Validation Error",
        codes::PAYLOAD_TOO_LARGE => "Payload Too Large",
        codes::RATE_LIMIT_EXCEEDED => "Rate Limit Exceeded",
        codes::SERVER_UNAVAILABLE => "Server Unavailable",
        codes::CANNOT_PARSE_RESPONSE => "Cannot Parse Response",
        codes::COMMON_ERROR => "Common Error",
        codes::APP_NOT_FOUND => "App Not Found",
        codes::BACKUP_DOWNLOAD_FAILED => "Backup Download Failed",
        codes::CANNOT_READ_FILE => "Cannot Read File",
        codes::REQUEST_TIMEOUT => "Request Timeout",
        codes::CONNECTION_FAILED => "Connection Failed",
        codes::NETWORK_ERROR => "Network Error",
        codes::INVALID_CONFIG => "Invalid Configuration",
        codes::INVALID_URL => "Invalid URL",
        codes::INVALID_REQUEST_BODY => "Invalid Request Body",
        "ACCESS_DENIED" => "Access Denied",
        "USER_NOT_FOUND" => "User Not Found",
        "FILE_NOT_FOUND" => "File Not Found",
        "INVALID_API_KEY" => "Invalid API Key",
        "INVALID_ACCESS_TOKEN" => "Invalid Access Token",
        "INVALID_FILE" => "Invalid File",
        "INVALID_DOMAIN" => "Invalid Domain",
        "MISSING_CONFIG" => "Missing Configuration File",
        "INVALID_CONFIG_FILE" => "Invalid Configuration File",
        "FEW_MEMORY" => "Not Enough Memory",
        "BAD_MEMORY" => "Bad Memory Value",
        "MISSING_MAIN" => "Missing Main File",
        "INVALID_MAIN" => "Invalid Main File",
        "REGEX_VALIDATION" => "Regex Validation Failed",
        "DELAY_NOW" => "Action Throttled",
        "CUSTOM_DOMAIN_REQUIRED" => "Custom Domain Required",
        "PLAN_REQUIRED" => "Higher Plan Required",
        "APP_ALREADY_RUNNING" => "App Already Running",
        "APP_ALREADY_STOPPED" => "App Already Stopped",
        _ => return fallback_description(code),
    };
    Cow::Borrowed(known)
}

fn fallback_description(code: &str) -> Cow<'static, str> {
    if code.starts_with(codes::CONTRACT_PREFIX) {
        Cow::Borrowed("Unexpected API Response")
    } else if code.starts_with(codes::INVALID_PREFIX) {
        Cow::Borrowed("Invalid Argument")
    } else if code.is_empty() {
        Cow::Borrowed("Unknown Error")
    } else {
        Cow::Owned(code.to_string())
    }
}
