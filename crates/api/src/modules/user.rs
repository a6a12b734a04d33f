//! Current user operations

use squarecloud_core::CacheService;
use squarecloud_domain::Result;
use squarecloud_infra::{routes, RequestOptions};
use tracing::{info, instrument};

use crate::cache::{GlobalCache, UserKey};
use crate::client::SquareCloudAPI;
use crate::events::{UserChange, UserUpdate};
use crate::session::Session;
use crate::structures::User;

/// Operations on the account behind the API key
#[derive(Debug, Clone, Copy)]
pub struct UserModule<'a> {
    client: &'a SquareCloudAPI,
}

impl<'a> UserModule<'a> {
    pub(crate) fn new(client: &'a SquareCloudAPI) -> Self {
        Self { client }
    }

    /// Fetch the user and store it in the global `user` slot.
    pub async fn get(&self) -> Result<User> {
        refresh_user(self.client.session(), self.client.cache_service()).await
    }
}

/// Fetch the user, write the `user` slot and emit `userUpdate`.
#[instrument(skip_all)]
pub(crate) async fn refresh_user(
    session: &Session,
    cache: &CacheService<GlobalCache>,
) -> Result<User> {
    let data = session.fetch(routes::user(), RequestOptions::new()).await?;
    let user = User::from_api(session, data);

    let before = cache.set::<UserKey>(user.clone());
    session.events().emit::<UserUpdate>(&UserChange { before, after: user.clone() });

    info!(applications = user.applications.len(), "user fetched");
    Ok(user)
}
