//! Integration tests for the client facade
//!
//! **Coverage:**
//! - Local argument validation never reaches the network
//! - User fetch fills the global cache and emits `userUpdate`
//! - Application lookup, website narrowing and `APP_NOT_FOUND`
//! - Bulk status and upload
//! - Construction from `SQUARECLOUD_*` environment variables

#[path = "support.rs"]
mod support;

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use serde_json::json;
use squarecloud::{ErrorKind, SquareCloudAPI, UserKey, UserUpdate};
use support::{
    application_payload, client_for, failure, mount_get, success, user_payload, APP_ID, SITE_ID,
    TEST_API_KEY,
};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[tokio::test]
async fn invalid_arguments_fail_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = client_for(&server);

    let err = client.applications().fetch("").await.unwrap_err();
    assert_eq!(err.code(), "INVALID_APP_ID");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = client.applications().get_one("   ").await.unwrap_err();
    assert!(err.code().starts_with("INVALID_"));

    let err = client.applications().create(std::path::PathBuf::new()).await.unwrap_err();
    assert!(err.code().starts_with("INVALID_"));
}

#[tokio::test]
async fn user_fetch_updates_cache_and_emits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/users/me"))
        .and(header("authorization", support::TEST_API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success(user_payload(Some("dev@example.com")))),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    client.on::<UserUpdate, _>(move |change| {
        sink.lock().unwrap().push((change.before.is_some(), change.after.id.clone()));
    });

    let user = client.user().get().await.unwrap();
    assert_eq!(user.id, support::USER_ID);
    assert!(user.has_access());
    assert_eq!(user.email(), Some("dev@example.com"));
    assert_eq!(user.plan.expires_timestamp, Some(1_735_689_600_000));
    assert_eq!(user.applications.len(), 2);
    assert!(user.application(APP_ID).is_some());

    let apps = client.applications().get().await.unwrap();
    assert_eq!(apps.len(), 2);
    assert!(apps.iter().all(|app| !app.is_website()));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(false, support::USER_ID.to_string()), (true, support::USER_ID.to_string())]
    );
    assert_eq!(client.cache().get::<UserKey>().map(|u| u.id), Some(support::USER_ID.into()));
}

#[tokio::test]
async fn access_denied_email_means_restricted() {
    let server = MockServer::start().await;
    mount_get(&server, "users/me", success(user_payload(Some("Access denied")))).await;

    let user = client_for(&server).user().get().await.unwrap();
    assert!(!user.has_access());
    assert_eq!(user.email(), None);
}

#[tokio::test]
async fn get_one_reports_missing_application() {
    let server = MockServer::start().await;
    mount_get(&server, "users/me", success(user_payload(None))).await;

    let client = client_for(&server);
    let app = client.applications().get_one(SITE_ID).await.unwrap();
    assert_eq!(app.name, "site");
    assert_eq!(app.url, format!("https://squarecloud.app/dashboard/app/{SITE_ID}"));

    let err = client.applications().get_one("missing").await.unwrap_err();
    assert_eq!(err.code(), "APP_NOT_FOUND");
    assert_eq!(err.message(), "App Not Found: No application with id missing");
}

#[tokio::test]
async fn website_variant_follows_domain() {
    let server = MockServer::start().await;
    mount_get(&server, &format!("apps/{APP_ID}"), success(application_payload(APP_ID, None))).await;
    mount_get(
        &server,
        &format!("apps/{SITE_ID}"),
        success(application_payload(SITE_ID, Some("site.squareweb.app"))),
    )
    .await;

    let client = client_for(&server);

    let app = client.applications().fetch(APP_ID).await.unwrap();
    assert!(!app.is_website());
    assert!(app.as_website().is_none());

    let site = client.applications().fetch(SITE_ID).await.unwrap();
    assert!(site.is_website());
    let website = site.as_website().expect("website variant");
    assert_eq!(website.domain(), "site.squareweb.app");
    assert_eq!(website.custom(), None);
    assert_eq!(website.id, SITE_ID);
}

#[tokio::test]
async fn listed_application_fetches_full_variant() {
    let server = MockServer::start().await;
    mount_get(&server, "users/me", success(user_payload(None))).await;
    mount_get(
        &server,
        &format!("apps/{SITE_ID}"),
        success(application_payload(SITE_ID, Some("site.squareweb.app"))),
    )
    .await;

    let client = client_for(&server);
    let listed = client.applications().get_one(SITE_ID).await.unwrap();
    assert!(!listed.is_website());

    let full = listed.fetch().await.unwrap();
    assert!(full.is_website());
}

#[tokio::test]
async fn status_all_exposes_usage_only_when_running() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "apps/status",
        success(json!([
            { "id": APP_ID, "running": true, "cpu": "3%", "ram": "40MB" },
            { "id": SITE_ID, "running": false },
        ])),
    )
    .await;
    mount_get(&server, &format!("apps/{APP_ID}/status"), success(support::status_payload())).await;

    let statuses = client_for(&server).applications().status_all().await.unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].usage.as_ref().map(|u| u.cpu.as_str()), Some("3%"));
    assert!(statuses[1].usage.is_none());

    let full = statuses[0].fetch().await.unwrap();
    assert_eq!(full.application_id, APP_ID);
    assert!(full.running);
}

#[tokio::test]
async fn upload_sends_multipart_archive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!({
            "id": "new-app",
            "name": "uploaded",
            "description": null,
            "domain": null,
            "ram": 512,
            "cpu": 0.5,
            "language": { "name": "rust", "version": "1.80" },
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("bundle.zip");
    std::fs::write(&archive, b"PK\x03\x04").unwrap();

    let uploaded = client_for(&server).applications().create(archive).await.unwrap();
    assert_eq!(uploaded.id, "new-app");
    assert_eq!(uploaded.language.version, "1.80");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("filename=\"app.zip\""));
}

#[tokio::test]
async fn missing_upload_file_is_classified() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let err = client_for(&server)
        .applications()
        .create(std::path::PathBuf::from("/nonexistent/bundle.zip"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CANNOT_READ_FILE");
}

#[tokio::test]
async fn error_envelope_code_reaches_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(failure("ACCESS_DENIED")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.user().get().await.unwrap_err();
    assert_eq!(err.code(), "ACCESS_DENIED");
    assert_eq!(err.status(), Some(401));
    assert!(!client.cache().contains::<UserKey>());
}

#[tokio::test]
async fn client_from_env_uses_configured_host() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/users/me"))
        .and(header("authorization", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(user_payload(None))))
        .expect(1)
        .mount(&server)
        .await;

    let client = {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var("SQUARECLOUD_API_KEY", TEST_API_KEY);
        std::env::set_var("SQUARECLOUD_BASE_URL", server.uri());
        std::env::set_var("SQUARECLOUD_API_VERSION", "v3");

        let client = SquareCloudAPI::from_env();

        std::env::remove_var("SQUARECLOUD_API_KEY");
        std::env::remove_var("SQUARECLOUD_BASE_URL");
        std::env::remove_var("SQUARECLOUD_API_VERSION");
        client.unwrap()
    };

    let user = client.user().get().await.unwrap();
    assert!(!user.has_access());
    assert_eq!(client.api().user_id(), "4242");
}
