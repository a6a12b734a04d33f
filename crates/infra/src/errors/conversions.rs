//! Conversions from external infrastructure errors into the SDK error.

use reqwest::header::InvalidHeaderValue;
use reqwest::Error as HttpError;
use squarecloud_domain::{codes, ErrorKind, SquareCloudError};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the SDK error.
#[derive(Debug)]
pub struct InfraError(pub SquareCloudError);

impl From<InfraError> for SquareCloudError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SquareCloudError> for InfraError {
    fn from(value: SquareCloudError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSquareCloudError {
    fn into_squarecloud(self) -> SquareCloudError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SquareCloudError */
/* -------------------------------------------------------------------------- */

impl IntoSquareCloudError for HttpError {
    fn into_squarecloud(self) -> SquareCloudError {
        if self.is_timeout() {
            return SquareCloudError::transport(codes::REQUEST_TIMEOUT, "HTTP request timed out");
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return SquareCloudError::transport(
                codes::CONNECTION_FAILED,
                format!("HTTP connection failure: {self}"),
            );
        }

        if self.is_builder() {
            return SquareCloudError::new(ErrorKind::InvalidInput, codes::INVALID_URL)
                .with_detail(self.to_string());
        }

        if let Some(status) = self.status() {
            return SquareCloudError::application(None, Some(self.to_string()), status.as_u16());
        }

        SquareCloudError::transport(codes::NETWORK_ERROR, self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_squarecloud())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → SquareCloudError */
/* -------------------------------------------------------------------------- */

impl IntoSquareCloudError for url::ParseError {
    fn into_squarecloud(self) -> SquareCloudError {
        SquareCloudError::new(ErrorKind::InvalidInput, codes::INVALID_URL)
            .with_detail(format!("URL could not be parsed: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(value.into_squarecloud())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → SquareCloudError (request bodies) */
/* -------------------------------------------------------------------------- */

impl IntoSquareCloudError for serde_json::Error {
    fn into_squarecloud(self) -> SquareCloudError {
        SquareCloudError::new(ErrorKind::InvalidInput, codes::INVALID_REQUEST_BODY)
            .with_detail(self.to_string())
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_squarecloud())
    }
}

/* -------------------------------------------------------------------------- */
/* InvalidHeaderValue → SquareCloudError */
/* -------------------------------------------------------------------------- */

impl IntoSquareCloudError for InvalidHeaderValue {
    fn into_squarecloud(self) -> SquareCloudError {
        SquareCloudError::invalid_input(
            Some("HEADER"),
            "Expect header-safe string, got control characters",
        )
    }
}

impl From<InvalidHeaderValue> for InfraError {
    fn from(value: InvalidHeaderValue) -> Self {
        InfraError(value.into_squarecloud())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
