//! SDK constants
//!
//! Defaults shared by configuration loading, the transport layer and the
//! domain objects.

// Endpoints
pub const DEFAULT_BASE_URL: &str = "https://api.squarecloud.app";
pub const DEFAULT_API_VERSION: &str = "v2";
pub const DEFAULT_SNAPSHOTS_URL: &str = "https://snapshots.squarecloud.app";

// Transport
pub const USER_AGENT_PREFIX: &str = "squarecloud-sdk-rs";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// Files
pub const DEFAULT_FILES_PATH: &str = "/";
pub const DEFAULT_COMMIT_FILE_NAME: &str = "commit.zip";
pub const UPLOAD_FILE_NAME: &str = "app.zip";
pub const MULTIPART_FILE_FIELD: &str = "file";

// Event names
pub const EVENT_STATUS_UPDATE: &str = "statusUpdate";
pub const EVENT_LOGS_UPDATE: &str = "logsUpdate";
pub const EVENT_BACKUPS_UPDATE: &str = "backupsUpdate";
pub const EVENT_USER_UPDATE: &str = "userUpdate";

/// Message the API returns in place of private account fields.
pub const ACCESS_DENIED_MARKER: &str = "Access denied";
