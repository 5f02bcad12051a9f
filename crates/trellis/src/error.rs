//! Error types for the Trello client
//!
//! One error enum covers argument validation, transport failures, HTTP
//! status errors returned by Trello, and decoding problems. Rate limiting
//! (HTTP 429) is absorbed by the executor and only shows up here as
//! [`Error::RetriesExhausted`] when an attempt ceiling is configured.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a trellis error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Trello client.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument has the wrong shape (e.g. non-object options).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP method name is not one of POST, GET, PUT, DELETE.
    #[error(
        "Unsupported request method '{0}'. Pass one of these methods: POST, GET, PUT, DELETE."
    )]
    UnsupportedMethod(String),

    /// API returned a bad request error (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Key or token rejected (401).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Token lacks permission for the resource (403).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500+).
    #[error("Internal server error (status {status}): {message}")]
    InternalServerError {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Generic API error for status codes not covered above.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Every allowed attempt was answered with HTTP 429.
    #[error("Rate limited on all {attempts} attempts")]
    RetriesExhausted {
        /// Number of physical attempts issued
        attempts: u32,
    },

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A single attempt exceeded the transport timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid backoff window or attempt ceiling.
    #[error("Invalid retry configuration: {0}")]
    Backoff(#[from] trellis_core::retry::BackoffError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// Context description
        context: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error from a non-success HTTP status and its body.
    ///
    /// Trello answers most errors with a plain-text body (`invalid key`), and
    /// some with a JSON object carrying `message` and `error` fields. Both
    /// shapes are reduced to a single message string.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(ApiErrorResponse {
                message: Some(message),
                ..
            }) => message,
            Ok(ApiErrorResponse {
                error: Some(error), ..
            }) => error,
            _ => body.trim().to_string(),
        };

        match status {
            400 => Error::BadRequest(message),
            401 => Error::Authentication(message),
            403 => Error::PermissionDenied(message),
            404 => Error::NotFound(message),
            s if s >= 500 => Error::InternalServerError { status, message },
            _ => Error::ApiError { status, message },
        }
    }

    /// Check if a caller could reasonably retry this error.
    ///
    /// The client itself never retries these; only HTTP 429 is retried
    /// internally.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::InternalServerError { .. } => true,
            Error::Connection(_) => true,
            Error::Timeout(_) => true,
            Error::RetriesExhausted { .. } => true,
            Error::ApiError { status, .. } => *status == 408 || *status == 409,
            _ => false,
        }
    }

    /// HTTP status code carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest(_) => Some(400),
            Error::Authentication(_) => Some(401),
            Error::PermissionDenied(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::InternalServerError { status, .. } | Error::ApiError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Add context to an error.
    pub fn context<C>(self, context: C) -> Self
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        Error::WithContext {
            context: context.to_string(),
            source: Box::new(self),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    message: Option<String>,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_response_plain_text() {
        let error = Error::from_response(401, "invalid key\n");
        assert_matches!(error, Error::Authentication(msg) if msg == "invalid key");

        let error = Error::from_response(404, "The requested resource was not found.");
        assert_matches!(error, Error::NotFound(_));
        assert_eq!(
            error.to_string(),
            "Resource not found: The requested resource was not found."
        );
    }

    #[test]
    fn test_from_response_json_body() {
        let error = Error::from_response(
            400,
            r#"{"message":"invalid value for idList","error":"ERROR"}"#,
        );
        assert_matches!(error, Error::BadRequest(msg) if msg == "invalid value for idList");

        let error = Error::from_response(403, r#"{"error":"unauthorized card permission"}"#);
        assert_matches!(error, Error::PermissionDenied(msg) if msg == "unauthorized card permission");
    }

    #[test]
    fn test_from_response_status_buckets() {
        assert_matches!(
            Error::from_response(503, "down"),
            Error::InternalServerError { status: 503, .. }
        );
        assert_matches!(
            Error::from_response(418, "teapot"),
            Error::ApiError { status: 418, message } if message == "teapot"
        );
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(
            Error::InternalServerError {
                status: 500,
                message: "test".to_string()
            }
            .is_retryable()
        );
        assert!(Error::Connection("test".to_string()).is_retryable());
        assert!(Error::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(Error::RetriesExhausted { attempts: 3 }.is_retryable());

        assert!(!Error::BadRequest("test".to_string()).is_retryable());
        assert!(!Error::Authentication("test".to_string()).is_retryable());
        assert!(!Error::UnsupportedMethod("PATCH".to_string()).is_retryable());
        assert!(!Error::InvalidArgument("options".to_string()).is_retryable());
    }

    #[test]
    fn test_error_status() {
        assert_eq!(Error::NotFound("x".to_string()).status(), Some(404));
        assert_eq!(Error::from_response(502, "bad gateway").status(), Some(502));
        assert_eq!(Error::Connection("reset".to_string()).status(), None);
    }

    #[test]
    fn test_unsupported_method_message() {
        let error = Error::UnsupportedMethod("PATCH".to_string());
        assert!(error.to_string().contains("PATCH"));
        assert!(error.to_string().contains("POST, GET, PUT, DELETE"));
    }

    #[test]
    fn test_error_context() {
        let error = Error::NotFound("board".to_string());
        let with_context = error.context("Failed to fetch lists");

        match with_context {
            Error::WithContext { context, source } => {
                assert_eq!(context, "Failed to fetch lists");
                assert!(source.to_string().contains("board"));
            }
            _ => panic!("Expected WithContext error"),
        }
    }
}
