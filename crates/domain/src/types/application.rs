//! Application payloads

use serde::{Deserialize, Serialize};

use super::enums::ApplicationLanguage;

/// Full application info from `apps/{id}`
///
/// Website applications carry `domain` (and optionally `custom`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiApplication {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    pub cluster: String,
    pub ram: u64,
    pub language: ApplicationLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl ApiApplication {
    pub fn is_website(&self) -> bool {
        self.domain.is_some()
    }
}

/// Summary returned after uploading a new application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUploadedApplication {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    pub ram: u64,
    pub cpu: f64,
    pub language: ApiUploadedLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUploadedLanguage {
    pub name: String,
    pub version: String,
}
