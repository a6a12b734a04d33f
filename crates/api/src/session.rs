//! Shared handle held by every object a client creates

use std::sync::Arc;

use squarecloud_core::EventEmitter;
use squarecloud_domain::{ApiPayload, Result};
use squarecloud_infra::{require_response, ApiService, Endpoint, RequestOptions, Route};

use crate::events::ClientEvents;

/// Transport plus event emitter of one client.
///
/// Holds no cache: cached users own applications, which own sessions.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    api: Arc<ApiService>,
    events: Arc<EventEmitter<ClientEvents>>,
}

impl Session {
    pub(crate) fn new(api: ApiService) -> Self {
        Self { api: Arc::new(api), events: Arc::new(EventEmitter::new()) }
    }

    pub(crate) fn api(&self) -> &ApiService {
        &self.api
    }

    pub(crate) fn events(&self) -> &EventEmitter<ClientEvents> {
        &self.events
    }

    /// Full envelope; used by actions that only report success.
    pub(crate) async fn call<E: Endpoint>(
        &self,
        route: Route<E>,
        options: RequestOptions<E::Body>,
    ) -> Result<ApiPayload<E::Response>> {
        self.api.request(route, options).await
    }

    /// The envelope's `response`, which must be present.
    pub(crate) async fn fetch<E: Endpoint>(
        &self,
        route: Route<E>,
        options: RequestOptions<E::Body>,
    ) -> Result<E::Response> {
        let payload = self.api.request(route, options).await?;
        require_response(payload, E::TEMPLATE)
    }
}
