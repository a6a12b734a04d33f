use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use squarecloud_domain::{
    ApplicationLanguage, ApplicationState, DeploymentState, FieldMismatch, Result,
    SquareCloudError,
};
use tracing::warn;

use super::literal::json_type;

/// Payload shapes the SDK checks before building domain objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiObjectKind {
    UserInfo,
    Application,
    WebsiteApplication,
    Status,
    StatusAll,
    Backup,
    Deployment,
}

impl ApiObjectKind {
    /// Code segment embedded in contract error codes.
    pub fn code(self) -> &'static str {
        match self {
            Self::UserInfo => "USER_INFO",
            Self::Application => "APPLICATION",
            Self::WebsiteApplication => "WEBSITE_APPLICATION",
            Self::Status => "STATUS",
            Self::StatusAll => "STATUS_ALL",
            Self::Backup => "BACKUP",
            Self::Deployment => "DEPLOYMENT",
        }
    }

    /// JSON Schema (draft 7) describing the payload.
    pub fn schema(self) -> &'static Value {
        match self {
            Self::UserInfo => &USER_INFO_SCHEMA,
            Self::Application => &APPLICATION_SCHEMA,
            Self::WebsiteApplication => &WEBSITE_APPLICATION_SCHEMA,
            Self::Status => &STATUS_SCHEMA,
            Self::StatusAll => &STATUS_ALL_SCHEMA,
            Self::Backup => &BACKUP_SCHEMA,
            Self::Deployment => &DEPLOYMENT_SCHEMA,
        }
    }

    fn validator(self) -> &'static JSONSchema {
        match self {
            Self::UserInfo => &USER_INFO,
            Self::Application => &APPLICATION,
            Self::WebsiteApplication => &WEBSITE_APPLICATION,
            Self::Status => &STATUS,
            Self::StatusAll => &STATUS_ALL,
            Self::Backup => &BACKUP,
            Self::Deployment => &DEPLOYMENT,
        }
    }
}

/* --- Schemas --- */

fn nullable(kind: &str) -> Value {
    json!({ "type": [kind, "null"] })
}

fn application_properties() -> serde_json::Map<String, Value> {
    let mut props = serde_json::Map::new();
    props.insert("id".into(), json!({ "type": "string" }));
    props.insert("name".into(), json!({ "type": "string" }));
    props.insert("desc".into(), nullable("string"));
    props.insert("cluster".into(), json!({ "type": "string" }));
    props.insert("ram".into(), json!({ "type": "integer", "minimum": 0 }));
    props.insert("language".into(), json!({ "enum": ApplicationLanguage::WIRE_VALUES }));
    props
}

static APPLICATION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["id", "name", "cluster", "ram", "language"],
        "properties": application_properties(),
    })
});

static WEBSITE_APPLICATION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let mut props = application_properties();
    props.insert("domain".into(), json!({ "type": "string" }));
    props.insert("custom".into(), nullable("string"));
    json!({
        "type": "object",
        "required": ["id", "name", "cluster", "ram", "language", "domain"],
        "properties": props,
    })
});

static USER_INFO_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["user", "applications"],
        "properties": {
            "user": {
                "type": "object",
                "required": ["id", "name", "plan"],
                "properties": {
                    "id": { "type": "string" },
                    "name": { "type": "string" },
                    "email": nullable("string"),
                    "plan": {
                        "type": "object",
                        "required": ["name", "memory"],
                        "properties": {
                            "name": { "type": "string" },
                            "memory": {
                                "type": "object",
                                "required": ["limit", "available", "used"],
                                "properties": {
                                    "limit": { "type": "integer", "minimum": 0 },
                                    "available": { "type": "integer", "minimum": 0 },
                                    "used": { "type": "integer", "minimum": 0 },
                                },
                            },
                            "duration": nullable("integer"),
                        },
                    },
                },
            },
            "applications": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["id", "name", "ram", "lang", "cluster"],
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "desc": nullable("string"),
                        "ram": { "type": "integer", "minimum": 0 },
                        "lang": { "enum": ApplicationLanguage::WIRE_VALUES },
                        "cluster": { "type": "string" },
                    },
                },
            },
        },
    })
});

static STATUS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["cpu", "ram", "status", "running", "storage", "network", "requests"],
        "properties": {
            "cpu": { "type": "string" },
            "ram": { "type": "string" },
            "status": { "enum": ApplicationState::WIRE_VALUES },
            "running": { "type": "boolean" },
            "storage": { "type": "string" },
            "network": {
                "type": "object",
                "required": ["total", "now"],
                "properties": {
                    "total": { "type": "string" },
                    "now": { "type": "string" },
                },
            },
            "requests": { "type": "integer", "minimum": 0 },
            "uptime": nullable("integer"),
        },
    })
});

static STATUS_ALL_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "anyOf": [
            {
                "type": "object",
                "required": ["id", "cpu", "ram", "running"],
                "properties": {
                    "id": { "type": "string" },
                    "cpu": { "type": "string" },
                    "ram": { "type": "string" },
                    "running": { "const": true },
                },
            },
            {
                "type": "object",
                "required": ["id", "running"],
                "properties": {
                    "id": { "type": "string" },
                    "running": { "const": false },
                },
            },
        ],
    })
});

static BACKUP_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["name", "size", "modified", "key"],
        "properties": {
            "name": { "type": "string" },
            "size": { "type": "integer", "minimum": 0 },
            "modified": { "type": ["string", "integer"] },
            "key": { "type": "string" },
        },
    })
});

static DEPLOYMENT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["id", "state", "date"],
        "properties": {
            "id": { "type": "string" },
            "state": { "enum": DeploymentState::WIRE_VALUES },
            "date": { "type": ["string", "integer"] },
        },
    })
});

fn compile(schema: &'static Value) -> JSONSchema {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .expect("built-in payload schema should compile - this is a bug")
}

static APPLICATION: Lazy<JSONSchema> = Lazy::new(|| compile(&APPLICATION_SCHEMA));
static WEBSITE_APPLICATION: Lazy<JSONSchema> = Lazy::new(|| compile(&WEBSITE_APPLICATION_SCHEMA));
static USER_INFO: Lazy<JSONSchema> = Lazy::new(|| compile(&USER_INFO_SCHEMA));
static STATUS: Lazy<JSONSchema> = Lazy::new(|| compile(&STATUS_SCHEMA));
static STATUS_ALL: Lazy<JSONSchema> = Lazy::new(|| compile(&STATUS_ALL_SCHEMA));
static BACKUP: Lazy<JSONSchema> = Lazy::new(|| compile(&BACKUP_SCHEMA));
static DEPLOYMENT: Lazy<JSONSchema> = Lazy::new(|| compile(&DEPLOYMENT_SCHEMA));

/* --- Assertions --- */

fn collect_mismatches(kind: ApiObjectKind, value: &Value, prefix: &str) -> Vec<FieldMismatch> {
    match kind.validator().validate(value) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|err| FieldMismatch {
                path: format!("{prefix}{}", err.instance_path),
                expected: err.to_string(),
                actual: err.instance.to_string(),
            })
            .collect(),
    }
}

fn contract_failure(
    kind: ApiObjectKind,
    route: &str,
    mismatches: Vec<FieldMismatch>,
) -> SquareCloudError {
    warn!(
        kind = kind.code(),
        route,
        mismatches = mismatches.len(),
        "API payload failed shape assertion"
    );
    SquareCloudError::contract(kind.code(), route, mismatches)
}

/// Check a decoded payload against the shape declared for `route`.
pub fn assert_api_object(kind: ApiObjectKind, route: &str, value: &Value) -> Result<()> {
    let mismatches = collect_mismatches(kind, value, "");
    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(contract_failure(kind, route, mismatches))
    }
}

/// Check every element of an array payload; mismatch paths carry the index.
pub fn assert_api_array(kind: ApiObjectKind, route: &str, value: &Value) -> Result<()> {
    let Some(items) = value.as_array() else {
        let mismatch = FieldMismatch {
            path: String::new(),
            expected: "array".to_string(),
            actual: json_type(value).to_string(),
        };
        return Err(contract_failure(kind, route, vec![mismatch]));
    };

    let mismatches: Vec<FieldMismatch> = items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| collect_mismatches(kind, item, &format!("/{index}")))
        .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(contract_failure(kind, route, mismatches))
    }
}

/// Assert the shape, then deserialize into the wire type.
pub fn decode_api_object<T: DeserializeOwned>(
    kind: ApiObjectKind,
    route: &str,
    value: Value,
) -> Result<T> {
    assert_api_object(kind, route, &value)?;
    serde_json::from_value(value).map_err(|err| {
        let mismatch = FieldMismatch {
            path: String::new(),
            expected: kind.code().to_lowercase(),
            actual: err.to_string(),
        };
        contract_failure(kind, route, vec![mismatch])
    })
}
