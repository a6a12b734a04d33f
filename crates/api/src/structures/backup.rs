//! Application backups (snapshots)

use chrono::{DateTime, Utc};
use squarecloud_domain::{codes, ApiBackup, ErrorKind, Result, SquareCloudError};
use tracing::{instrument, warn};

use crate::session::Session;

/// A stored backup of an application's files
#[derive(Debug, Clone)]
pub struct Backup {
    session: Session,
    pub application_id: String,
    pub name: String,
    /// Archive size in bytes
    pub size: u64,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_timestamp: Option<i64>,
    /// Storage access key
    pub key: String,
    /// Signed download URL
    pub url: String,
}

impl Backup {
    pub(crate) fn from_api(session: Session, application_id: &str, data: ApiBackup) -> Self {
        let ApiBackup { name, size, modified, key } = data;
        let modified_at = modified.to_datetime();
        let url = download_url(
            &session.api().config().snapshots_url,
            session.api().user_id(),
            &name,
            &key,
        );

        Self {
            session,
            application_id: application_id.to_string(),
            name,
            size,
            modified_at,
            modified_timestamp: modified_at.map(|at| at.timestamp_millis()),
            key,
            url,
        }
    }

    /// Download the archive bytes.
    #[instrument(skip(self), fields(app_id = %self.application_id, backup = %self.name))]
    pub async fn download(&self) -> Result<Vec<u8>> {
        download_archive(&self.session, &self.url).await
    }
}

/// `<snapshots>/applications/<user>/<name>.zip?<key>`
pub(crate) fn download_url(snapshots_url: &str, user_id: &str, name: &str, key: &str) -> String {
    format!("{}/applications/{user_id}/{name}.zip?{key}", snapshots_url.trim_end_matches('/'))
}

/// GET a storage URL; every failure becomes `BACKUP_DOWNLOAD_FAILED`.
pub(crate) async fn download_archive(session: &Session, url: &str) -> Result<Vec<u8>> {
    session.api().download(url).await.map_err(|err| {
        warn!(code = err.code(), error = %err, "backup download failed");
        SquareCloudError::new(ErrorKind::Transport, codes::BACKUP_DOWNLOAD_FAILED)
            .with_detail(err.message().to_string())
    })
}
