//! Backups (snapshots) of an application

use squarecloud_domain::{ApiBackupCreated, Result};
use squarecloud_infra::{routes, RequestOptions};
use tracing::{info, instrument};

use crate::cache::BackupsKey;
use crate::events::{ApplicationChange, BackupsUpdate};
use crate::structures::backup::download_archive;
use crate::structures::{Application, Backup};

/// List, generate and download backups
#[derive(Debug, Clone, Copy)]
pub struct BackupsModule<'a> {
    application: &'a Application,
}

impl<'a> BackupsModule<'a> {
    pub(crate) fn new(application: &'a Application) -> Self {
        Self { application }
    }

    /// Stored backups; refreshes the `backups` slot.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn list(&self) -> Result<Vec<Backup>> {
        let app = self.application;
        let session = app.session();
        let data = session.fetch(routes::apps::snapshots(&app.id), RequestOptions::new()).await?;

        let backups: Vec<Backup> = data
            .into_iter()
            .map(|backup| Backup::from_api(session.clone(), &app.id, backup))
            .collect();

        let before = app.cache_service().set::<BackupsKey>(backups.clone());
        session.events().emit::<BackupsUpdate>(&ApplicationChange {
            application: app.clone(),
            before,
            after: backups.clone(),
        });

        info!(count = backups.len(), "backups fetched");
        Ok(backups)
    }

    /// Generate a new backup; returns its download URL and key.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn create(&self) -> Result<ApiBackupCreated> {
        self.application
            .session()
            .fetch(routes::apps::generate_snapshot(&self.application.id), RequestOptions::new())
            .await
    }

    /// Generate a new backup and download it.
    ///
    /// Download failures surface as `BACKUP_DOWNLOAD_FAILED`.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn download(&self) -> Result<Vec<u8>> {
        let created = self.create().await?;
        download_archive(self.application.session(), &created.url).await
    }
}
