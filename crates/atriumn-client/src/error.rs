//! Client error types.

use thiserror::Error;

/// Taxonomy member an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or rejected credentials.
    Authentication,
    /// Request or configuration rejected as invalid.
    Validation,
    /// The requested task does not exist.
    NotFound,
    /// Any other failure: non-success status, bad body, transport, closed client.
    Api,
}

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication failed, remotely (401) or locally (no API key).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Validation failed, remotely (400/422) or locally (bad base URL or input).
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// The server does not know the task (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server returned an error status not covered by a more specific kind.
    #[error("API request failed with status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `detail` from the server, or the raw body.
        message: String,
    },

    /// A success status carried a body that is not a JSON object.
    #[error("Invalid JSON response (status {status}): {body}")]
    InvalidResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response text.
        body: String,
    },

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The client was closed before the call.
    #[error("Client is closed")]
    Closed,
}

impl Error {
    /// The taxonomy member this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Api { .. }
            | Error::InvalidResponse { .. }
            | Error::Transport(_)
            | Error::Closed => ErrorKind::Api,
        }
    }

    /// HTTP status behind this error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::InvalidResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }

    /// Check if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Api { status: 429, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            Error::Transport(format!("connection failed: {}", err))
        } else {
            Error::Transport(err.to_string())
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_generic_failures() {
        assert_eq!(Error::Closed.kind(), ErrorKind::Api);
        assert_eq!(Error::Transport("boom".into()).kind(), ErrorKind::Api);
        assert_eq!(
            Error::InvalidResponse {
                status: 200,
                body: "<html>".into()
            }
            .kind(),
            ErrorKind::Api
        );
        assert_eq!(
            Error::Authentication("x".into()).kind(),
            ErrorKind::Authentication
        );
    }

    #[test]
    fn test_status() {
        let err = Error::Api {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(err.is_server_error());
        assert!(!err.is_rate_limited());
        assert_eq!(Error::NotFound("task not found".into()).status(), None);
    }

    #[test]
    fn test_display_includes_status_and_detail() {
        let err = Error::Api {
            status: 500,
            message: "Internal server error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("Internal server error"));

        let err = Error::Authentication("Invalid API key".into());
        assert_eq!(err.to_string(), "Authentication failed: Invalid API key");
    }
}
