//! Client events
//!
//! Every event fires synchronously after the matching cache slot has been
//! written, inside the call that fetched the value.

use squarecloud_core::define_events;

use crate::structures::{Application, ApplicationStatus, Backup, User};

/// An application-scoped cache slot changed.
#[derive(Debug, Clone)]
pub struct ApplicationChange<T> {
    pub application: Application,
    /// Cached value before the fetch; `None` on the first fetch.
    pub before: Option<T>,
    pub after: T,
}

/// The global `user` slot changed.
#[derive(Debug, Clone)]
pub struct UserChange {
    pub before: Option<User>,
    pub after: User,
}

define_events! {
    /// Channels of every event a client emits
    pub struct ClientEvents {
        status: StatusUpdate("statusUpdate") => ApplicationChange<ApplicationStatus>,
        logs: LogsUpdate("logsUpdate") => ApplicationChange<String>,
        backups: BackupsUpdate("backupsUpdate") => ApplicationChange<Vec<Backup>>,
        user: UserUpdate("userUpdate") => UserChange,
    }
}

#[cfg(test)]
mod tests {
    use squarecloud_core::Event;
    use squarecloud_domain::constants::{
        EVENT_BACKUPS_UPDATE, EVENT_LOGS_UPDATE, EVENT_STATUS_UPDATE, EVENT_USER_UPDATE,
    };

    use super::*;

    #[test]
    fn event_names_match_wire_names() {
        assert_eq!(<StatusUpdate as Event<ClientEvents>>::NAME, EVENT_STATUS_UPDATE);
        assert_eq!(<LogsUpdate as Event<ClientEvents>>::NAME, EVENT_LOGS_UPDATE);
        assert_eq!(<BackupsUpdate as Event<ClientEvents>>::NAME, EVENT_BACKUPS_UPDATE);
        assert_eq!(<UserUpdate as Event<ClientEvents>>::NAME, EVENT_USER_UPDATE);
    }
}
