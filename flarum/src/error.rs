//! Error types.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// The main error type for Flarum client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The client was configured with an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid argument passed to an API method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The forum answered with a non-success status.
    #[error("Flarum API error [{status}]: {}", summarize(.errors))]
    Api { status: StatusCode, errors: Vec<Value> },

    /// Response body was present but not JSON.
    #[error("Unexpected response body [{status}]: {body}")]
    UnexpectedBody { status: StatusCode, body: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } | Error::UnexpectedBody { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

/// Render JSON:API error objects as `code: detail` pairs.
fn summarize(errors: &[Value]) -> String {
    if errors.is_empty() {
        return "no error details".to_owned();
    }

    errors
        .iter()
        .map(|e| {
            let code = e.get("code").and_then(Value::as_str).unwrap_or("error");
            match e.get("detail").and_then(Value::as_str) {
                Some(detail) => format!("{code}: {detail}"),
                None => code.to_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for Flarum client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let e = Error::Api {
            status: StatusCode::UNAUTHORIZED,
            errors: vec![json!({"status": "401", "code": "not_authenticated"})],
        };
        assert_eq!(
            format!("{}", e),
            "Flarum API error [401 Unauthorized]: not_authenticated"
        );

        let e = Error::Api {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            errors: vec![json!({"code": "validation_error", "detail": "title is required"})],
        };
        assert!(format!("{}", e).ends_with("validation_error: title is required"));
    }

    #[test]
    fn test_auth_error() {
        let unauthorized = Error::Api {
            status: StatusCode::UNAUTHORIZED,
            errors: Vec::new(),
        };
        assert!(unauthorized.is_auth_error());

        let forbidden = Error::Api {
            status: StatusCode::FORBIDDEN,
            errors: Vec::new(),
        };
        assert!(forbidden.is_auth_error());

        let missing = Error::Api {
            status: StatusCode::NOT_FOUND,
            errors: Vec::new(),
        };
        assert!(!missing.is_auth_error());
        assert!(!Error::config("bad scheme").is_auth_error());
    }
}
