//! Shared fixtures for client integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use squarecloud::{ClientConfig, SquareCloudAPI};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "4242-integration-key";
pub const USER_ID: &str = "4242";
pub const APP_ID: &str = "abc";
pub const SITE_ID: &str = "site";

/// Client whose API and snapshot hosts both point at `server`.
pub fn client_for(server: &MockServer) -> SquareCloudAPI {
    let config = ClientConfig {
        base_url: server.uri(),
        snapshots_url: server.uri(),
        ..ClientConfig::new(TEST_API_KEY)
    };
    SquareCloudAPI::with_config(config).expect("client should build for mock server")
}

pub fn success(response: Value) -> Value {
    json!({ "status": "success", "response": response })
}

pub fn failure(code: &str) -> Value {
    json!({ "status": "error", "code": code })
}

pub fn user_payload(email: Option<&str>) -> Value {
    json!({
        "user": {
            "id": USER_ID,
            "name": "integration",
            "email": email,
            "plan": {
                "name": "hobby",
                "memory": { "limit": 1024, "available": 512, "used": 512 },
                "duration": 1_735_689_600_000_i64,
            },
        },
        "applications": [
            {
                "id": APP_ID,
                "name": "bot",
                "desc": "discord bot",
                "ram": 256,
                "lang": "rust",
                "cluster": "fl-1",
            },
            { "id": SITE_ID, "name": "site", "ram": 256, "lang": "static", "cluster": "fl-2" },
        ],
    })
}

pub fn application_payload(id: &str, domain: Option<&str>) -> Value {
    let mut payload = json!({
        "id": id,
        "name": "bot",
        "desc": null,
        "cluster": "fl-1",
        "ram": 256,
        "language": "rust",
    });
    if let Some(domain) = domain {
        payload["domain"] = json!(domain);
        payload["custom"] = json!(null);
    }
    payload
}

/// Status payload used by the end-to-end status scenario.
pub fn status_payload() -> Value {
    json!({
        "id": APP_ID,
        "cpu": "1%",
        "ram": "10%",
        "network": { "total": "0", "now": "0" },
        "storage": "0",
        "running": true,
        "status": "running",
        "requests": 0,
    })
}

/// Mount `GET /v2/<route>` answering with `body`.
pub async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{route}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Standard (non-website) application fetched through the info endpoint.
pub async fn fetch_app(server: &MockServer, client: &SquareCloudAPI) -> squarecloud::Application {
    mount_get(server, &format!("apps/{APP_ID}"), success(application_payload(APP_ID, None))).await;
    client.applications().fetch(APP_ID).await.expect("application should be fetched")
}
