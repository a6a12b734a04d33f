//! Route builders for every operation the SDK performs
//!
//! Each function returns a [`Route`] typed with its endpoint marker, so the
//! method, body and response type follow from the call site. Variable
//! filters (such as a file path) travel as query parameters, not path
//! segments.

use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::Value;
use squarecloud_domain::{
    ApiApplication, ApiApplicationStatus, ApiBackup, ApiBackupCreated, ApiDeployment,
    ApiFileContent, ApiListedFile, ApiLogs, ApiStatusAllEntry, ApiUploadedApplication,
    ApiUserInfo, ApiWebhook, CustomDomainBody, DeleteFileBody, DnsRecord, GithubWebhookBody,
    MoveFileBody, UpsertFileBody,
};

use super::endpoint::{Endpoint, Route};
use super::request::Json;

macro_rules! endpoints {
    ($(
        $(#[$meta:meta])*
        $name:ident: $method:ident $template:literal, body = $body:ty, response = $response:ty;
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Endpoint for $name {
                type Body = $body;
                type Response = $response;

                const METHOD: Method = Method::$method;
                const TEMPLATE: &'static str = $template;
            }
        )+
    };
}

/// Endpoint markers
pub mod endpoints {
    use super::*;

    endpoints! {
        /// Authenticated user and their applications
        UserInfo: GET "users/me", body = (), response = ApiUserInfo;
        /// Upload a new application bundle
        UploadApplication: POST "apps", body = Form, response = ApiUploadedApplication;
        /// Status of every application of the account
        StatusAll: GET "apps/status", body = (), response = Vec<ApiStatusAllEntry>;
        ApplicationInfo: GET "apps/{app_id}", body = (), response = ApiApplication;
        DeleteApplication: DELETE "apps/{app_id}", body = (), response = ();
        ApplicationStatus: GET "apps/{app_id}/status", body = (), response = ApiApplicationStatus;
        ApplicationLogs: GET "apps/{app_id}/logs", body = (), response = ApiLogs;
        Commit: POST "apps/{app_id}/commit", body = Form, response = ();
        ListSnapshots: GET "apps/{app_id}/snapshots", body = (), response = Vec<ApiBackup>;
        GenerateSnapshot: POST "apps/{app_id}/snapshots", body = (), response = ApiBackupCreated;
        Start: POST "apps/{app_id}/start", body = (), response = ();
        Restart: POST "apps/{app_id}/restart", body = (), response = ();
        Stop: POST "apps/{app_id}/stop", body = (), response = ();
        /// File content; filtered by the `path` query parameter
        ReadFile: GET "apps/{app_id}/files/content", body = (), response = ApiFileContent;
        /// Directory listing; filtered by the `path` query parameter
        ListFiles: GET "apps/{app_id}/files", body = (), response = Vec<ApiListedFile>;
        UpsertFile: PUT "apps/{app_id}/files", body = Json<UpsertFileBody>, response = ();
        MoveFile: PATCH "apps/{app_id}/files", body = Json<MoveFileBody>, response = ();
        DeleteFile: DELETE "apps/{app_id}/files", body = Json<DeleteFileBody>, response = ();
        ListDeployments: GET "apps/{app_id}/deployments", body = (), response = Vec<ApiDeployment>;
        CurrentDeployment: GET "apps/{app_id}/deployments/current", body = (), response = ApiWebhook;
        GithubWebhook: POST "apps/{app_id}/deploy/webhook", body = Json<GithubWebhookBody>, response = ApiWebhook;
        NetworkDns: GET "apps/{app_id}/network/dns", body = (), response = Vec<DnsRecord>;
        CustomDomain: POST "apps/{app_id}/network/custom", body = Json<CustomDomainBody>, response = ();
        NetworkAnalytics: GET "apps/{app_id}/network/analytics", body = (), response = Value;
    }
}

use endpoints as ep;

pub fn user() -> Route<ep::UserInfo> {
    Route::new(["users", "me"])
}

pub mod apps {
    use super::*;

    pub fn upload() -> Route<ep::UploadApplication> {
        Route::new(["apps"])
    }

    pub fn status_all() -> Route<ep::StatusAll> {
        Route::new(["apps", "status"])
    }

    pub fn info(app_id: &str) -> Route<ep::ApplicationInfo> {
        Route::new(["apps", app_id])
    }

    pub fn delete(app_id: &str) -> Route<ep::DeleteApplication> {
        Route::new(["apps", app_id])
    }

    pub fn status(app_id: &str) -> Route<ep::ApplicationStatus> {
        Route::new(["apps", app_id, "status"])
    }

    pub fn logs(app_id: &str) -> Route<ep::ApplicationLogs> {
        Route::new(["apps", app_id, "logs"])
    }

    pub fn commit(app_id: &str) -> Route<ep::Commit> {
        Route::new(["apps", app_id, "commit"])
    }

    pub fn snapshots(app_id: &str) -> Route<ep::ListSnapshots> {
        Route::new(["apps", app_id, "snapshots"])
    }

    pub fn generate_snapshot(app_id: &str) -> Route<ep::GenerateSnapshot> {
        Route::new(["apps", app_id, "snapshots"])
    }

    pub fn start(app_id: &str) -> Route<ep::Start> {
        Route::new(["apps", app_id, "start"])
    }

    pub fn restart(app_id: &str) -> Route<ep::Restart> {
        Route::new(["apps", app_id, "restart"])
    }

    pub fn stop(app_id: &str) -> Route<ep::Stop> {
        Route::new(["apps", app_id, "stop"])
    }

    pub mod files {
        use super::*;

        pub fn read(app_id: &str) -> Route<ep::ReadFile> {
            Route::new(["apps", app_id, "files", "content"])
        }

        pub fn list(app_id: &str) -> Route<ep::ListFiles> {
            Route::new(["apps", app_id, "files"])
        }

        pub fn upsert(app_id: &str) -> Route<ep::UpsertFile> {
            Route::new(["apps", app_id, "files"])
        }

        pub fn move_file(app_id: &str) -> Route<ep::MoveFile> {
            Route::new(["apps", app_id, "files"])
        }

        pub fn delete(app_id: &str) -> Route<ep::DeleteFile> {
            Route::new(["apps", app_id, "files"])
        }
    }

    pub mod deployments {
        use super::*;

        pub fn list(app_id: &str) -> Route<ep::ListDeployments> {
            Route::new(["apps", app_id, "deployments"])
        }

        pub fn current(app_id: &str) -> Route<ep::CurrentDeployment> {
            Route::new(["apps", app_id, "deployments", "current"])
        }

        pub fn webhook(app_id: &str) -> Route<ep::GithubWebhook> {
            Route::new(["apps", app_id, "deploy", "webhook"])
        }
    }

    pub mod network {
        use super::*;

        pub fn dns(app_id: &str) -> Route<ep::NetworkDns> {
            Route::new(["apps", app_id, "network", "dns"])
        }

        pub fn custom(app_id: &str) -> Route<ep::CustomDomain> {
            Route::new(["apps", app_id, "network", "custom"])
        }

        pub fn analytics(app_id: &str) -> Route<ep::NetworkAnalytics> {
            Route::new(["apps", app_id, "network", "analytics"])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_templates() {
        assert_eq!(user().path(), "users/me");
        assert_eq!(apps::status("abc").path(), "apps/abc/status");
        assert_eq!(apps::status("abc").template(), "apps/{app_id}/status");
        assert_eq!(apps::files::read("abc").path(), "apps/abc/files/content");
        assert_eq!(apps::deployments::webhook("abc").path(), "apps/abc/deploy/webhook");
        assert_eq!(apps::network::analytics("abc").path(), "apps/abc/network/analytics");
    }

    #[test]
    fn methods_are_owned_by_routes() {
        assert_eq!(apps::info("a").method(), Method::GET);
        assert_eq!(apps::delete("a").method(), Method::DELETE);
        assert_eq!(apps::snapshots("a").method(), Method::GET);
        assert_eq!(apps::generate_snapshot("a").method(), Method::POST);
        assert_eq!(apps::files::list("a").method(), Method::GET);
        assert_eq!(apps::files::upsert("a").method(), Method::PUT);
        assert_eq!(apps::files::move_file("a").method(), Method::PATCH);
        assert_eq!(apps::files::delete("a").method(), Method::DELETE);
        assert_eq!(apps::start("a").method(), Method::POST);
    }

    #[test]
    fn ids_stay_a_single_segment() {
        let route = apps::status("a/b");
        assert_eq!(route.segments(), &["apps", "a/b", "status"]);
    }
}
