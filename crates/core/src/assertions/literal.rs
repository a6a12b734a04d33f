use serde_json::Value;
use squarecloud_domain::{FileSource, Result, SquareCloudError};

/// Caller-supplied string: must contain a non-whitespace character and no NUL.
pub fn assert_string(value: &str, code: Option<&str>) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(code, "string", "empty string"));
    }
    if value.contains('\0') {
        return Err(invalid(code, "string", "string containing NUL"));
    }
    Ok(())
}

/// A path must be non-empty; in-memory bytes are always accepted.
pub fn assert_path_like(value: &FileSource, code: Option<&str>) -> Result<()> {
    match value {
        FileSource::Bytes(_) => Ok(()),
        FileSource::Path(path) if path.as_os_str().is_empty() => {
            Err(invalid(code, "path or bytes", "empty path"))
        }
        FileSource::Path(path) => match path.to_str() {
            Some(text) => assert_string(text, code)
                .map_err(|_| invalid(code, "path or bytes", "blank path")),
            None => Ok(()),
        },
    }
}

fn invalid(code: Option<&str>, expect: &str, got: &str) -> SquareCloudError {
    SquareCloudError::invalid_input(code, format!("Expect {expect}, got {got}"))
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use squarecloud_domain::ErrorKind;

    use super::*;

    #[test]
    fn accepts_regular_strings() {
        assert!(assert_string("abc123", Some("APP_ID")).is_ok());
        assert!(assert_string(" /a b ", None).is_ok());
    }

    #[test]
    fn rejects_blank_strings_with_argument_code() {
        for input in ["", "   ", "\t\n"] {
            let err = assert_string(input, Some("APP_ID")).unwrap_err();
            assert_eq!(err.code(), "INVALID_APP_ID");
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert_eq!(err.detail(), Some("Expect string, got empty string"));
        }
    }

    #[test]
    fn rejects_nul_bytes() {
        let err = assert_string("a\0b", Some("FILE_NAME")).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_NAME");
    }

    #[test]
    fn missing_code_is_validation_error() {
        let err = assert_string("", None).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn path_like_accepts_bytes_and_paths() {
        assert!(assert_path_like(&FileSource::Bytes(Vec::new()), None).is_ok());
        assert!(assert_path_like(&FileSource::Path(PathBuf::from("app.zip")), None).is_ok());

        let empty = FileSource::Path(PathBuf::new());
        let err = assert_path_like(&empty, Some("COMMIT_FILE")).unwrap_err();
        assert_eq!(err.code(), "INVALID_COMMIT_FILE");
        assert_eq!(err.detail(), Some("Expect path or bytes, got empty path"));
    }
}
