//! Response envelope shared by every endpoint

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// `{ status, code?, message?, response? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiPayload<T> {
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
}

impl<T> ApiPayload<T> {
    pub fn is_success(&self) -> bool {
        self.status == ApiStatus::Success
    }

    /// Replace the response body, keeping the envelope fields.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiPayload<U> {
        ApiPayload {
            status: self.status,
            code: self.code,
            message: self.message,
            response: self.response.map(f),
        }
    }
}

/// Raw, not yet decoded envelope.
///
/// Every field is optional so that empty objects and partial error bodies can
/// be classified instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl RawEnvelope {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    pub fn api_status(&self) -> ApiStatus {
        if self.is_error() {
            ApiStatus::Error
        } else {
            ApiStatus::Success
        }
    }
}

/// Timestamps arrive as epoch milliseconds or as RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiDate {
    Millis(i64),
    Text(String),
}

impl ApiDate {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    text.parse::<i64>().ok().and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                }),
        }
    }
}
