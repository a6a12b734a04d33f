//! Cache scopes
//!
//! The client owns a [`GlobalCache`]; every [`Application`] value owns its
//! own [`ApplicationCache`]. Only fetch methods write to them.

use squarecloud_core::define_cache_scope;

use crate::structures::{ApplicationStatus, Backup, User};

define_cache_scope! {
    /// Client-wide cache
    pub struct GlobalCache {
        user: UserKey => User,
    }
}

define_cache_scope! {
    /// Per-application cache
    pub struct ApplicationCache {
        status: StatusKey => ApplicationStatus,
        backups: BackupsKey => Vec<Backup>,
        logs: LogsKey => String,
    }
}
