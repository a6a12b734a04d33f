//! Account-wide application operations

use reqwest::multipart::{Form, Part};
use squarecloud_core::{assert_path_like, assert_string};
use squarecloud_domain::constants::{MULTIPART_FILE_FIELD, UPLOAD_FILE_NAME};
use squarecloud_domain::{
    codes, ApiUploadedApplication, ErrorKind, FileSource, Result, SquareCloudError,
};
use squarecloud_infra::{routes, RequestOptions};
use tracing::{info, instrument};

use super::user::refresh_user;
use crate::client::SquareCloudAPI;
use crate::session::Session;
use crate::structures::{Application, SimpleApplicationStatus};
use crate::utils::files::read_file_source;

/// Listing, lookup, upload and bulk status of applications
#[derive(Debug, Clone, Copy)]
pub struct ApplicationsModule<'a> {
    client: &'a SquareCloudAPI,
}

impl<'a> ApplicationsModule<'a> {
    pub(crate) fn new(client: &'a SquareCloudAPI) -> Self {
        Self { client }
    }

    /// Applications of the current user.
    ///
    /// Refreshes the global `user` slot.
    pub async fn get(&self) -> Result<Vec<Application>> {
        let user = refresh_user(self.client.session(), self.client.cache_service()).await?;
        Ok(user.applications)
    }

    /// One application of the current user.
    ///
    /// Fails with `APP_NOT_FOUND` when the user does not own `application_id`.
    pub async fn get_one(&self, application_id: &str) -> Result<Application> {
        assert_string(application_id, Some("APP_ID"))?;

        let user = refresh_user(self.client.session(), self.client.cache_service()).await?;
        user.applications.into_iter().find(|app| app.id == application_id).ok_or_else(|| {
            SquareCloudError::new(ErrorKind::Application, codes::APP_NOT_FOUND)
                .with_detail(format!("No application with id {application_id}"))
        })
    }

    /// Upload a new application from a zip archive.
    #[instrument(skip_all)]
    pub async fn create(&self, file: impl Into<FileSource>) -> Result<ApiUploadedApplication> {
        let file = file.into();
        assert_path_like(&file, Some("UPLOAD_FILE"))?;

        let bytes = read_file_source(file).await?;
        let form = Form::new()
            .part(MULTIPART_FILE_FIELD, Part::bytes(bytes).file_name(UPLOAD_FILE_NAME));

        let uploaded = self
            .client
            .session()
            .fetch(routes::apps::upload(), RequestOptions::new().body(form))
            .await?;

        info!(app_id = %uploaded.id, "application uploaded");
        Ok(uploaded)
    }

    /// Summary status of every application.
    #[instrument(skip_all)]
    pub async fn status_all(&self) -> Result<Vec<SimpleApplicationStatus>> {
        let session = self.client.session();
        let entries = session.fetch(routes::apps::status_all(), RequestOptions::new()).await?;

        Ok(entries
            .into_iter()
            .map(|entry| SimpleApplicationStatus::from_api(session.clone(), entry))
            .collect())
    }

    /// Full application information, website variant included.
    pub async fn fetch(&self, application_id: &str) -> Result<Application> {
        assert_string(application_id, Some("APP_ID"))?;
        fetch_application(self.client.session(), application_id).await
    }
}

#[instrument(skip(session))]
pub(crate) async fn fetch_application(
    session: &Session,
    application_id: &str,
) -> Result<Application> {
    let data = session.fetch(routes::apps::info(application_id), RequestOptions::new()).await?;
    Ok(Application::from_api(session.clone(), data))
}
