//! File manager of an application

use squarecloud_core::{assert_path_like, assert_string};
use squarecloud_domain::constants::DEFAULT_FILES_PATH;
use squarecloud_domain::{
    ApiListedFile, DeleteFileBody, FileSource, MoveFileBody, Result, UpsertFileBody,
};
use squarecloud_infra::{routes, RequestOptions};
use tracing::{debug, instrument};

use crate::structures::Application;
use crate::utils::files::read_file_source;

/// Read and write files inside an application's storage
///
/// Paths are absolute inside the application, e.g. `/src/index.js`.
#[derive(Debug, Clone, Copy)]
pub struct FilesModule<'a> {
    application: &'a Application,
}

impl<'a> FilesModule<'a> {
    pub(crate) fn new(application: &'a Application) -> Self {
        Self { application }
    }

    /// Entries of a directory; `None` lists the root.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn list(&self, path: Option<&str>) -> Result<Vec<ApiListedFile>> {
        let path = path.unwrap_or(DEFAULT_FILES_PATH);
        assert_string(path, Some("LIST_FILES_PATH"))?;

        let payload = self
            .application
            .session()
            .call(
                routes::apps::files::list(&self.application.id),
                RequestOptions::new().query("path", path),
            )
            .await?;
        Ok(payload.response.unwrap_or_default())
    }

    /// File content, or `None` when the API returned nothing.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        assert_string(path, Some("READ_FILE_PATH"))?;

        let payload = self
            .application
            .session()
            .call(
                routes::apps::files::read(&self.application.id),
                RequestOptions::new().query("path", path),
            )
            .await?;
        Ok(payload.response.map(|content| content.data))
    }

    /// Create a file named `file_name` inside directory `path` (root when `None`).
    #[instrument(skip(self, file), fields(app_id = %self.application.id))]
    pub async fn create(
        &self,
        file: impl Into<FileSource>,
        file_name: &str,
        path: Option<&str>,
    ) -> Result<bool> {
        let file = file.into();
        let path = path.unwrap_or(DEFAULT_FILES_PATH);
        assert_path_like(&file, Some("CREATE_FILE"))?;
        assert_string(file_name, Some("CREATE_FILE_NAME"))?;
        assert_string(path, Some("CREATE_FILE_PATH"))?;

        self.upsert(file, join_path(path, file_name)).await
    }

    /// Replace the content of the file at `path`.
    #[instrument(skip(self, file), fields(app_id = %self.application.id))]
    pub async fn edit(&self, file: impl Into<FileSource>, path: &str) -> Result<bool> {
        let file = file.into();
        assert_path_like(&file, Some("EDIT_FILE"))?;
        assert_string(path, Some("EDIT_FILE_PATH"))?;

        self.upsert(file, normalize(path)).await
    }

    /// Move or rename a file.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn move_file(&self, path: &str, new_path: &str) -> Result<bool> {
        assert_string(path, Some("MOVE_FILE_PATH"))?;
        assert_string(new_path, Some("MOVE_FILE_NEW_PATH"))?;

        let body = MoveFileBody { path: path.to_string(), to: new_path.to_string() };
        let payload = self
            .application
            .session()
            .call(
                routes::apps::files::move_file(&self.application.id),
                RequestOptions::new().json(body),
            )
            .await?;
        Ok(payload.is_success())
    }

    /// Delete a file or directory.
    #[instrument(skip(self), fields(app_id = %self.application.id))]
    pub async fn delete(&self, path: &str) -> Result<bool> {
        assert_string(path, Some("DELETE_FILE_PATH"))?;

        let body = DeleteFileBody { path: path.to_string() };
        let payload = self
            .application
            .session()
            .call(
                routes::apps::files::delete(&self.application.id),
                RequestOptions::new().json(body),
            )
            .await?;
        Ok(payload.is_success())
    }

    async fn upsert(&self, file: FileSource, path: String) -> Result<bool> {
        let bytes = read_file_source(file).await?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        debug!(path = %path, size = bytes.len(), "writing file");

        let payload = self
            .application
            .session()
            .call(
                routes::apps::files::upsert(&self.application.id),
                RequestOptions::new().json(UpsertFileBody { content, path }),
            )
            .await?;
        Ok(payload.is_success())
    }
}

/// Forward slashes only.
fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// `dir` + `/` + `name` without doubled separators.
fn join_path(dir: &str, name: &str) -> String {
    let dir = normalize(dir);
    let name = normalize(name);
    format!("{}/{}", dir.trim_end_matches('/'), name.trim_start_matches('/'))
}
