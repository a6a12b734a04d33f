//! Shared helpers for infra integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use squarecloud_domain::ClientConfig;
use squarecloud_infra::ApiService;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "1234567890-test-key";

/// Config pointing the transport at a mock server.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig { base_url: server.uri(), ..ClientConfig::new(TEST_API_KEY) }
}

/// Transport service bound to a mock server.
pub fn service_for(server: &MockServer) -> ApiService {
    ApiService::new(config_for(server)).expect("service should build for mock server")
}

/// `{status: "success", response: ...}`
pub fn success(response: Value) -> Value {
    json!({ "status": "success", "response": response })
}

/// `{status: "error", code: ...}`
pub fn failure(code: &str) -> Value {
    json!({ "status": "error", "code": code })
}

/// Well-formed application status payload.
pub fn status_payload(running: bool) -> Value {
    json!({
        "cpu": "1%",
        "ram": "10%",
        "status": if running { "running" } else { "exited" },
        "running": running,
        "storage": "0",
        "network": { "total": "0", "now": "0" },
        "requests": 0,
        "uptime": 1_700_000_000_123_i64,
    })
}
