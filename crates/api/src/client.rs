//! Client entry point

use squarecloud_core::{CacheService, CacheView, Event, ListenerId};
use squarecloud_domain::{ClientConfig, Result};
use squarecloud_infra::{config, ApiService};
use tracing::info;

use crate::cache::GlobalCache;
use crate::events::ClientEvents;
use crate::modules::{ApplicationsModule, UserModule};
use crate::session::Session;

/// Square Cloud API client
///
/// Owns one transport service, the client event emitter and the global
/// cache. Every object it returns shares the same transport and emitter.
#[derive(Debug)]
pub struct SquareCloudAPI {
    session: Session,
    cache: CacheService<GlobalCache>,
}

impl SquareCloudAPI {
    /// Client with default settings for `api_key`.
    ///
    /// # Errors
    /// `INVALID_API_KEY` when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Client with explicit settings.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let api = ApiService::new(config)?;
        info!(base_url = %api.config().versioned_base(), "client created");

        Ok(Self { session: Session::new(api), cache: CacheService::new() })
    }

    /// Client configured from `SQUARECLOUD_*` variables or a config file.
    pub fn from_env() -> Result<Self> {
        Self::with_config(config::load()?)
    }

    /// Transport service, for routes the modules do not cover.
    pub fn api(&self) -> &ApiService {
        self.session.api()
    }

    pub fn user(&self) -> UserModule<'_> {
        UserModule::new(self)
    }

    pub fn applications(&self) -> ApplicationsModule<'_> {
        ApplicationsModule::new(self)
    }

    /// Read-only view of the global cache.
    pub fn cache(&self) -> CacheView<'_, GlobalCache> {
        self.cache.view()
    }

    /// Subscribe to event `E`.
    ///
    /// Handlers run synchronously inside the fetch that triggered them; a
    /// panicking handler unwinds through that call.
    pub fn on<E, F>(&self, handler: F) -> ListenerId
    where
        E: Event<ClientEvents>,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.session.events().on::<E, F>(handler)
    }

    /// Unsubscribe a handler returned by [`on`](Self::on).
    pub fn off<E: Event<ClientEvents>>(&self, id: ListenerId) -> bool {
        self.session.events().off::<E>(id)
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn cache_service(&self) -> &CacheService<GlobalCache> {
        &self.cache
    }
}
