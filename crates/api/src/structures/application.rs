//! Hosted applications
//!
//! An [`Application`] comes either from the user listing or from the
//! application info endpoint. Only the latter tells whether the application
//! is a website, so the variant is tracked explicitly in
//! [`ApplicationVariant`] and narrowed with [`Application::as_website`].

use std::ops::Deref;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use squarecloud_core::{assert_path_like, assert_string, CacheService, CacheView};
use squarecloud_domain::constants::{DEFAULT_COMMIT_FILE_NAME, MULTIPART_FILE_FIELD};
use squarecloud_domain::{
    ApiApplication, ApiUserApplication, ApplicationLanguage, FileSource, Result,
};
use squarecloud_infra::{routes, RequestOptions};
use tracing::{info, instrument};

use super::status::ApplicationStatus;
use crate::cache::{ApplicationCache, LogsKey, StatusKey};
use crate::events::{ApplicationChange, LogsUpdate, StatusUpdate};
use crate::modules::{BackupsModule, DeploysModule, FilesModule, NetworkModule};
use crate::session::Session;
use crate::utils::files::read_file_source;

const DASHBOARD_APP_URL: &str = "https://squarecloud.app/dashboard/app";

/// Website-only fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteDetails {
    /// Default domain, e.g. `example.squareweb.app`
    pub domain: String,
    /// Custom domain, when one is configured
    pub custom: Option<String>,
}

/// How much is known about an application's kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationVariant {
    /// From the user listing, which does not say whether it is a website
    Listed,
    Standard,
    Website(WebsiteDetails),
}

/// A hosted application
#[derive(Debug, Clone)]
pub struct Application {
    session: Session,
    cache: Arc<CacheService<ApplicationCache>>,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Dashboard page of the application
    pub url: String,
    /// Allocated RAM in megabytes
    pub ram: u64,
    pub cluster: String,
    pub language: ApplicationLanguage,
    variant: ApplicationVariant,
}

impl Application {
    pub(crate) fn from_listing(session: Session, data: ApiUserApplication) -> Self {
        let ApiUserApplication { id, name, desc, ram, lang, cluster } = data;

        Self {
            session,
            cache: Arc::new(CacheService::new()),
            url: dashboard_url(&id),
            id,
            name,
            description: desc,
            ram,
            cluster,
            language: lang,
            variant: ApplicationVariant::Listed,
        }
    }

    pub(crate) fn from_api(session: Session, data: ApiApplication) -> Self {
        let ApiApplication { id, name, desc, cluster, ram, language, domain, custom } = data;
        let variant = match domain {
            Some(domain) => ApplicationVariant::Website(WebsiteDetails {
                domain,
                custom: custom.filter(|c| !c.is_empty()),
            }),
            None => ApplicationVariant::Standard,
        };

        Self {
            session,
            cache: Arc::new(CacheService::new()),
            url: dashboard_url(&id),
            id,
            name,
            description: desc,
            ram,
            cluster,
            language,
            variant,
        }
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn cache_service(&self) -> &CacheService<ApplicationCache> {
        &self.cache
    }

    pub fn variant(&self) -> &ApplicationVariant {
        &self.variant
    }

    /// True when the fetched payload carried a `domain`.
    pub fn is_website(&self) -> bool {
        matches!(self.variant, ApplicationVariant::Website(_))
    }

    /// Narrow to the website variant.
    pub fn as_website(&self) -> Option<WebsiteApplication<'_>> {
        match &self.variant {
            ApplicationVariant::Website(details) => {
                Some(WebsiteApplication { application: self, details })
            }
            _ => None,
        }
    }

    /// Read-only view of this application's cache.
    pub fn cache(&self) -> CacheView<'_, ApplicationCache> {
        self.cache.view()
    }

    pub fn files(&self) -> FilesModule<'_> {
        FilesModule::new(self)
    }

    pub fn backups(&self) -> BackupsModule<'_> {
        BackupsModule::new(self)
    }

    pub fn deploys(&self) -> DeploysModule<'_> {
        DeploysModule::new(self)
    }

    /// Fetch the full application, resolving its variant.
    pub async fn fetch(&self) -> Result<Application> {
        crate::modules::applications::fetch_application(&self.session, &self.id).await
    }

    /// Fetch the current status and store it in the `status` slot.
    #[instrument(skip(self), fields(app_id = %self.id))]
    pub async fn get_status(&self) -> Result<ApplicationStatus> {
        let data = self.session.fetch(routes::apps::status(&self.id), RequestOptions::new()).await?;
        let status = ApplicationStatus::from_api(&self.id, data);

        let before = self.cache.set::<StatusKey>(status.clone());
        self.session.events().emit::<StatusUpdate>(&ApplicationChange {
            application: self.clone(),
            before,
            after: status.clone(),
        });

        info!(running = status.running, state = %status.status, "status fetched");
        Ok(status)
    }

    /// Fetch the latest logs and store them in the `logs` slot.
    #[instrument(skip(self), fields(app_id = %self.id))]
    pub async fn get_logs(&self) -> Result<String> {
        let data = self.session.fetch(routes::apps::logs(&self.id), RequestOptions::new()).await?;
        let logs = data.logs;

        let before = self.cache.set::<LogsKey>(logs.clone());
        self.session.events().emit::<LogsUpdate>(&ApplicationChange {
            application: self.clone(),
            before,
            after: logs.clone(),
        });

        info!(size = logs.len(), "logs fetched");
        Ok(logs)
    }

    #[instrument(skip(self), fields(app_id = %self.id))]
    pub async fn start(&self) -> Result<bool> {
        let payload =
            self.session.call(routes::apps::start(&self.id), RequestOptions::new()).await?;
        Ok(payload.is_success())
    }

    #[instrument(skip(self), fields(app_id = %self.id))]
    pub async fn stop(&self) -> Result<bool> {
        let payload = self.session.call(routes::apps::stop(&self.id), RequestOptions::new()).await?;
        Ok(payload.is_success())
    }

    #[instrument(skip(self), fields(app_id = %self.id))]
    pub async fn restart(&self) -> Result<bool> {
        let payload =
            self.session.call(routes::apps::restart(&self.id), RequestOptions::new()).await?;
        Ok(payload.is_success())
    }

    /// Delete the application. Irreversible.
    #[instrument(skip(self), fields(app_id = %self.id))]
    pub async fn delete(&self) -> Result<bool> {
        let payload =
            self.session.call(routes::apps::delete(&self.id), RequestOptions::new()).await?;
        Ok(payload.is_success())
    }

    /// Upload a file (usually a zip) into the application folder.
    ///
    /// `file_name` defaults to `commit.zip`. `restart` is sent as the
    /// `restart` query flag when given; the API default applies otherwise.
    #[instrument(skip(self, file), fields(app_id = %self.id))]
    pub async fn commit(
        &self,
        file: impl Into<FileSource>,
        file_name: Option<&str>,
        restart: Option<bool>,
    ) -> Result<bool> {
        let file = file.into();
        assert_path_like(&file, Some("COMMIT_FILE"))?;
        if let Some(name) = file_name {
            assert_string(name, Some("FILE_NAME"))?;
        }

        let bytes = read_file_source(file).await?;
        let file_name = file_name.unwrap_or(DEFAULT_COMMIT_FILE_NAME).to_string();
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part(MULTIPART_FILE_FIELD, part);

        let mut options = RequestOptions::new().body(form);
        if let Some(restart) = restart {
            options = options.query("restart", restart.to_string());
        }

        let payload = self.session.call(routes::apps::commit(&self.id), options).await?;
        Ok(payload.is_success())
    }
}

fn dashboard_url(id: &str) -> String {
    format!("{DASHBOARD_APP_URL}/{id}")
}

/// An application known to be a website
#[derive(Debug, Clone, Copy)]
pub struct WebsiteApplication<'a> {
    application: &'a Application,
    details: &'a WebsiteDetails,
}

impl<'a> WebsiteApplication<'a> {
    pub fn domain(&self) -> &'a str {
        &self.details.domain
    }

    pub fn custom(&self) -> Option<&'a str> {
        self.details.custom.as_deref()
    }

    /// Custom domain, analytics and DNS management.
    pub fn network(&self) -> NetworkModule<'a> {
        NetworkModule::new(self.application)
    }
}

impl Deref for WebsiteApplication<'_> {
    type Target = Application;

    fn deref(&self) -> &Self::Target {
        self.application
    }
}
