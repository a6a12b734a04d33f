use std::fmt;
use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use squarecloud_core::{assert_api_array, decode_api_object, ApiObjectKind};
use squarecloud_domain::{
    ApiApplication, ApiApplicationStatus, ApiBackup, ApiBackupCreated, ApiDeployment,
    ApiFileContent, ApiListedFile, ApiLogs, ApiPayload, ApiStatusAllEntry, ApiUploadedApplication,
    ApiUserInfo, ApiWebhook, DnsRecord, FieldMismatch, Result, SquareCloudError,
};

use super::request::IntoRequestBody;

/// Static description of one logical API operation
pub trait Endpoint {
    /// Body accepted by the operation; `()` for none.
    type Body: IntoRequestBody;
    /// Decoded type of the envelope's `response` field.
    type Response: ResponseShape;

    const METHOD: Method;
    /// Path template relative to the versioned base, e.g. `apps/{app_id}/status`.
    const TEMPLATE: &'static str;
}

/// A concrete path for endpoint `E`
pub struct Route<E> {
    segments: Vec<String>,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E: Endpoint> Route<E> {
    pub(crate) fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { segments: segments.into_iter().map(Into::into).collect(), _endpoint: PhantomData }
    }

    /// Unencoded path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path relative to the versioned base.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn method(&self) -> Method {
        E::METHOD
    }

    pub fn template(&self) -> &'static str {
        E::TEMPLATE
    }
}

impl<E> Clone for Route<E> {
    fn clone(&self) -> Self {
        Self { segments: self.segments.clone(), _endpoint: PhantomData }
    }
}

impl<E: Endpoint> fmt::Debug for Route<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", E::METHOD, self.path())
    }
}

/// Decoding of a `response` value for a route
pub trait ResponseShape: Sized {
    /// Shape asserted before deserializing, if any.
    const KIND: Option<ApiObjectKind> = None;

    fn decode(value: Value, route: &str) -> Result<Self>;
}

/// Plain serde decoding; failures are contract errors for the route.
fn decode_plain<T: DeserializeOwned>(value: Value, route: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|err| {
        let mismatch = FieldMismatch {
            path: String::new(),
            expected: short_type_name::<T>().to_string(),
            actual: err.to_string(),
        };
        SquareCloudError::contract("RESPONSE", route, vec![mismatch])
    })
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

macro_rules! asserted_shape {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl ResponseShape for $ty {
                const KIND: Option<ApiObjectKind> = Some(ApiObjectKind::$kind);

                fn decode(value: Value, route: &str) -> Result<Self> {
                    decode_api_object(ApiObjectKind::$kind, route, value)
                }
            }
        )+
    };
}

macro_rules! plain_shape {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ResponseShape for $ty {
                fn decode(value: Value, route: &str) -> Result<Self> {
                    decode_plain(value, route)
                }
            }
        )+
    };
}

asserted_shape! {
    ApiUserInfo => UserInfo,
    ApiApplicationStatus => Status,
    ApiStatusAllEntry => StatusAll,
    ApiBackup => Backup,
    ApiDeployment => Deployment,
}

plain_shape! {
    ApiLogs,
    ApiBackupCreated,
    ApiWebhook,
    ApiListedFile,
    ApiFileContent,
    ApiUploadedApplication,
    DnsRecord,
}

/// Website applications are recognised by `domain` and checked against the
/// stricter website shape.
impl ResponseShape for ApiApplication {
    const KIND: Option<ApiObjectKind> = Some(ApiObjectKind::Application);

    fn decode(value: Value, route: &str) -> Result<Self> {
        let kind = match value.get("domain") {
            Some(domain) if !domain.is_null() => ApiObjectKind::WebsiteApplication,
            _ => ApiObjectKind::Application,
        };
        decode_api_object(kind, route, value)
    }
}

impl<T: ResponseShape> ResponseShape for Vec<T> {
    fn decode(value: Value, route: &str) -> Result<Self> {
        if let Some(kind) = T::KIND {
            assert_api_array(kind, route, &value)?;
        }
        match value {
            Value::Array(items) => items.into_iter().map(|item| T::decode(item, route)).collect(),
            other => {
                let mismatch = FieldMismatch {
                    path: String::new(),
                    expected: "array".to_string(),
                    actual: other.to_string(),
                };
                Err(SquareCloudError::contract("RESPONSE", route, vec![mismatch]))
            }
        }
    }
}

/// Raw JSON passthrough.
impl ResponseShape for Value {
    fn decode(value: Value, _route: &str) -> Result<Self> {
        Ok(value)
    }
}

/// Operations whose response body is ignored.
impl ResponseShape for () {
    fn decode(_value: Value, _route: &str) -> Result<Self> {
        Ok(())
    }
}

/// Extract `response` from a successful envelope, failing as a contract error
/// when the server omitted it.
pub fn require_response<T>(payload: ApiPayload<T>, route: &str) -> Result<T> {
    payload.response.ok_or_else(|| {
        let mismatch = FieldMismatch {
            path: "/response".to_string(),
            expected: "present".to_string(),
            actual: "missing".to_string(),
        };
        SquareCloudError::contract("RESPONSE", route, vec![mismatch])
    })
}
