//! Integration tests for application operations
//!
//! **Coverage:**
//! - Status and logs: cache write before event, `before` is the prior value
//! - Actions translate the envelope status to a boolean
//! - Files, backups, deployments and website network modules
//! - Rate limiting and error envelopes surface as classified errors

#[path = "support.rs"]
mod support;

use std::sync::{Arc, Mutex};

use serde_json::json;
use squarecloud::{
    ApplicationState, BackupsKey, BackupsUpdate, DeploymentState, ErrorKind, LogsKey, LogsUpdate,
    StatusKey, StatusUpdate,
};
use support::{
    application_payload, client_for, failure, fetch_app, mount_get, status_payload, success,
    APP_ID, SITE_ID, USER_ID,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn status_scenario_fills_cache() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    mount_get(&server, &format!("apps/{APP_ID}/status"), success(status_payload())).await;

    let status = app.get_status().await.unwrap();

    assert_eq!(status.application_id, "abc");
    assert!(status.running);
    assert_eq!(status.status, ApplicationState::Running);
    assert_eq!(status.usage.cpu, "1%");
    assert!(status.uptime.is_none());
    assert_eq!(app.cache().get::<StatusKey>(), Some(status));
}

#[tokio::test]
async fn repeated_status_fetches_emit_prior_values() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;

    let mut first = status_payload();
    first["requests"] = json!(1);
    let mut second = status_payload();
    second["requests"] = json!(2);
    Mock::given(method("GET"))
        .and(path(format!("/v2/apps/{APP_ID}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(first)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_get(&server, &format!("apps/{APP_ID}/status"), success(second)).await;

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    client.on::<StatusUpdate, _>(move |change| {
        // the slot already holds the new value when handlers run
        let cached = change.application.cache().get::<StatusKey>();
        assert_eq!(cached.as_ref(), Some(&change.after));
        sink.lock().unwrap().push((change.before.clone(), change.after.clone()));
    });

    let a = app.get_status().await.unwrap();
    let b = app.get_status().await.unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], (None, a.clone()));
    assert_eq!(events[1], (Some(a), b.clone()));
    assert_eq!(b.requests, 2);
    assert_eq!(app.cache().get::<StatusKey>(), Some(b));
}

#[tokio::test]
async fn logs_are_cached_and_emitted() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    let logs = success(json!({ "logs": "booted\n" }));
    mount_get(&server, &format!("apps/{APP_ID}/logs"), logs).await;

    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    client.on::<LogsUpdate, _>(move |change| {
        *sink.lock().unwrap() = Some((change.application.id.clone(), change.after.clone()));
    });

    assert_eq!(app.get_logs().await.unwrap(), "booted\n");
    assert_eq!(app.cache().get::<LogsKey>().as_deref(), Some("booted\n"));
    assert_eq!(*seen.lock().unwrap(), Some((APP_ID.to_string(), "booted\n".to_string())));

    app.cache().remove::<LogsKey>();
    assert!(!app.cache().contains::<LogsKey>());
}

#[tokio::test]
async fn actions_report_success() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;

    for action in ["start", "stop", "restart"] {
        Mock::given(method("POST"))
            .and(path(format!("/v2/apps/{APP_ID}/{action}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/apps/{APP_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(app.start().await.unwrap());
    assert!(app.stop().await.unwrap());
    assert!(app.restart().await.unwrap());
    assert!(app.delete().await.unwrap());
    assert!(!app.cache().contains::<StatusKey>());
}

#[tokio::test]
async fn rate_limit_is_surfaced_without_retry() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/apps/{APP_ID}/restart")))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = app.restart().await.unwrap_err();
    assert_eq!(err.message(), "Rate Limit Exceeded: Try again later");
    assert_eq!(err.kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn commit_uses_default_file_name() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/apps/{APP_ID}/commit")))
        .and(query_param("restart", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(app.commit(b"console.log(1)".to_vec(), None, Some(true)).await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let commit = requests.iter().find(|r| r.url.path().ends_with("/commit")).unwrap();
    assert!(String::from_utf8_lossy(&commit.body).contains("filename=\"commit.zip\""));
}

#[tokio::test]
async fn commit_without_restart_sends_no_flag() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/apps/{APP_ID}/commit")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(app.commit(b"x".to_vec(), Some("patch.zip"), None).await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let commit = requests.iter().find(|r| r.url.path().ends_with("/commit")).unwrap();
    assert_eq!(commit.url.query(), None);
    assert!(String::from_utf8_lossy(&commit.body).contains("filename=\"patch.zip\""));
}

#[tokio::test]
async fn file_listing_encodes_path_query() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/apps/{APP_ID}/files")))
        .and(query_param("path", "/a b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!([
            {
                "type": "directory",
                "name": "src",
                "size": 0,
                "lastModified": 1_700_000_000_000_i64,
            },
            { "type": "file", "name": "Cargo.toml", "size": 120 },
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let files = app.files().list(Some("/a b")).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1].name, "Cargo.toml");

    let requests = server.received_requests().await.unwrap();
    let listing = requests.iter().find(|r| r.url.path().ends_with("/files")).unwrap();
    assert_eq!(listing.url.query(), Some("path=%2Fa+b"));
    let decoded: Vec<_> = listing.url.query_pairs().collect();
    assert_eq!(decoded[0].1, "/a b");
}

#[tokio::test]
async fn file_read_and_writes() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;

    Mock::given(method("GET"))
        .and(path(format!("/v2/apps/{APP_ID}/files/content")))
        .and(query_param("path", "/index.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!({
            "type": "Buffer",
            "data": [104, 105],
        }))))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/v2/apps/{APP_ID}/files")))
        .and(body_json(json!({ "content": "hi", "path": "/src/index.js" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/v2/apps/{APP_ID}/files")))
        .and(body_json(json!({ "path": "/a.js", "to": "/b.js" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/apps/{APP_ID}/files")))
        .and(body_json(json!({ "path": "/b.js" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let files = app.files();
    assert_eq!(files.read("/index.js").await.unwrap(), Some(b"hi".to_vec()));
    assert!(files.create(b"hi".to_vec(), "index.js", Some("/src")).await.unwrap());
    assert!(files.edit(b"hi".to_vec(), "/src/index.js").await.unwrap());
    assert!(files.move_file("/a.js", "/b.js").await.unwrap());
    assert!(files.delete("/b.js").await.unwrap());

    let err = files.delete("").await.unwrap_err();
    assert_eq!(err.code(), "INVALID_DELETE_FILE_PATH");
}

#[tokio::test]
async fn backups_are_listed_cached_and_downloadable() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    mount_get(
        &server,
        &format!("apps/{APP_ID}/snapshots"),
        success(json!([{
            "name": "abc-2024",
            "size": 2048,
            "modified": "2024-05-01T12:00:00.000Z",
            "key": "AWSAccessKeyId=x",
        }])),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("/applications/{USER_ID}/abc-2024.zip")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK".to_vec()))
        .mount(&server)
        .await;

    let fired = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&fired);
    client.on::<BackupsUpdate, _>(move |change| {
        assert!(change.before.is_none());
        *counter.lock().unwrap() += change.after.len();
    });

    let backups = app.backups().list().await.unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(backups[0].size, 2048);
    assert_eq!(backups[0].modified_timestamp, Some(1_714_564_800_000));
    assert!(backups[0].url.ends_with("/applications/4242/abc-2024.zip?AWSAccessKeyId=x"));
    assert_eq!(*fired.lock().unwrap(), 1);
    assert_eq!(app.cache().get::<BackupsKey>().map(|b| b.len()), Some(1));

    assert_eq!(backups[0].download().await.unwrap(), b"PK".to_vec());
}

#[tokio::test]
async fn backup_download_failure_is_classified() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/apps/{APP_ID}/snapshots")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!({
            "url": format!("{}/missing.zip", server.uri()),
            "key": "k",
        }))))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let created = app.backups().create().await.unwrap();
    assert_eq!(created.key, "k");

    let err = app.backups().download().await.unwrap_err();
    assert_eq!(err.code(), "BACKUP_DOWNLOAD_FAILED");
}

#[tokio::test]
async fn deployments_and_webhooks() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    mount_get(
        &server,
        &format!("apps/{APP_ID}/deployments"),
        success(json!([{ "id": "git-123", "state": "success", "date": 1_700_000_000_000_i64 }])),
    )
    .await;
    mount_get(
        &server,
        &format!("apps/{APP_ID}/deployments/current"),
        success(json!({ "webhook": "https://hooks.example/current" })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/apps/{APP_ID}/deploy/webhook")))
        .and(body_json(json!({ "access_token": "ghp_token" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success(json!({ "webhook": "https://hooks.example/new" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let deploys = app.deploys();
    let list = deploys.list().await.unwrap();
    assert_eq!(list[0].id, "git-123");
    assert_eq!(list[0].state, DeploymentState::Success);
    assert_eq!(list[0].application_id, APP_ID);
    assert_eq!(list[0].created_timestamp, Some(1_700_000_000_000));

    assert_eq!(deploys.current_webhook().await.unwrap(), "https://hooks.example/current");
    assert_eq!(
        deploys.integrate_github_webhook("ghp_token").await.unwrap(),
        "https://hooks.example/new"
    );
}

#[tokio::test]
async fn website_network_module() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        &format!("apps/{SITE_ID}"),
        success(application_payload(SITE_ID, Some("site.squareweb.app"))),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/apps/{SITE_ID}/network/custom")))
        .and(body_json(json!({ "custom": "example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(
        &server,
        &format!("apps/{SITE_ID}/network/dns"),
        success(json!([{ "type": "cname", "name": "example.com", "value": "site.squareweb.app" }])),
    )
    .await;
    mount_get(
        &server,
        &format!("apps/{SITE_ID}/network/analytics"),
        success(json!({ "visits": 10 })),
    )
    .await;

    let client = client_for(&server);
    let site = client.applications().fetch(SITE_ID).await.unwrap();
    let network = site.as_website().expect("website").network();

    assert!(network.set_custom_domain("example.com").await.unwrap());
    assert_eq!(network.dns().await.unwrap()[0].name, "example.com");
    assert_eq!(network.analytics().await.unwrap()["visits"], 10);
}

#[tokio::test]
async fn error_envelope_leaves_cache_untouched() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = fetch_app(&server, &client).await;
    mount_get(&server, &format!("apps/{APP_ID}/status"), failure("APP_OFFLINE")).await;

    let err = app.get_status().await.unwrap_err();
    assert_eq!(err.code(), "APP_OFFLINE");
    assert!(!app.cache().contains::<StatusKey>());
}
