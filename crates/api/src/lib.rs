//! # Square Cloud SDK
//!
//! Typed client for the Square Cloud hosting REST API.
//!
//! This crate contains:
//! - The [`SquareCloudAPI`] client and its per-resource modules
//! - Domain objects built from validated payloads (user, application,
//!   status, backup, deployment)
//! - Client events and the global / per-application cache scopes
//! - Tracing setup helpers
//!
//! ## Architecture
//! - Depends on `squarecloud-domain`, `squarecloud-core` and `squarecloud-infra`
//! - One transport service per client, shared by every object it creates
//!
//! ```no_run
//! # async fn run() -> squarecloud::Result<()> {
//! use squarecloud::{SquareCloudAPI, StatusUpdate};
//!
//! let client = SquareCloudAPI::new("123-api-key")?;
//! client.on::<StatusUpdate, _>(|change| {
//!     tracing::info!(app = %change.application.id, running = change.after.running, "status");
//! });
//!
//! let app = client.applications().get_one("app-id").await?;
//! let status = app.get_status().await?;
//! assert_eq!(app.cache().get::<squarecloud::StatusKey>(), Some(status));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod events;
pub mod modules;
mod session;
pub mod structures;
pub mod utils;

pub use cache::{ApplicationCache, BackupsKey, GlobalCache, LogsKey, StatusKey, UserKey};
pub use client::SquareCloudAPI;
pub use events::{
    ApplicationChange, BackupsUpdate, ClientEvents, LogsUpdate, StatusUpdate, UserChange,
    UserUpdate,
};
pub use structures::{
    Application, ApplicationStatus, ApplicationVariant, Backup, Deployment,
    SimpleApplicationStatus, SimpleStatusUsage, StatusUsage, User, UserAccess, UserPlan,
    WebsiteApplication, WebsiteDetails,
};

// Re-export the shared vocabulary so callers need a single dependency
pub use squarecloud_core::{CacheView, ListenerId};
pub use squarecloud_domain::{
    codes, ApiBackupCreated, ApiListedFile, ApiUploadedApplication, ApplicationLanguage,
    ApplicationState, ClientConfig, DeploymentState, DnsRecord, ErrorKind, FieldMismatch,
    FileKind, FileSource, Result, SquareCloudError,
};
