//! Error handling for the MyParser client
//!
//! Every request failure surfaces as [`WorkerError::InvalidResponse`], whatever
//! went wrong on the way: the connection, the HTTP status, an empty body or a
//! payload that does not decode. The underlying [`ResponseFailure`] is kept as
//! the error source for diagnostics only.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myparser::error::WorkerError;
//!
//! match client.me().await {
//!     Ok(me) => println!("worker #{}", me.worker_id),
//!     Err(WorkerError::InvalidResponse { url, .. }) => eprintln!("{url} is unreachable"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by the worker clients
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The request could not be completed or its response could not be used
    #[error("Invalid response from {url}: {cause}")]
    InvalidResponse {
        url: String,
        #[source]
        cause: ResponseFailure,
    },

    /// The underlying HTTP client could not be built
    #[error("Failed to initialize HTTP client: {0}")]
    Init(#[source] reqwest::Error),

    /// The client configuration is not usable
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// What went wrong while talking to a worker
#[derive(Error, Debug)]
pub enum ResponseFailure {
    /// Connection, I/O or protocol failure
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    /// The server answered without a body
    #[error("empty response body")]
    EmptyBody,

    /// The body is not JSON of the expected shape
    #[error("malformed JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

impl WorkerError {
    pub(crate) fn invalid_response(url: impl Into<String>, cause: ResponseFailure) -> Self {
        Self::InvalidResponse {
            url: url.into(),
            cause,
        }
    }

    /// URL of the failed request, if the error came from a request
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidResponse { url, .. } => Some(url),
            Self::Init(_) | Self::Config(_) => None,
        }
    }

    /// Check if this is the request-failure kind
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse { .. })
    }

    /// Check if repeating the same call might succeed
    ///
    /// The clients never retry on their own; this is a hint for callers.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidResponse { cause, .. } => cause.is_recoverable(),
            Self::Init(_) | Self::Config(_) => false,
        }
    }
}

impl ResponseFailure {
    /// Transient failures: transport errors and server-side statuses
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status(status) => status.is_server_error(),
            Self::EmptyBody | Self::Decode(_) => false,
        }
    }
}

/// Result type alias using [`WorkerError`]
pub type Result<T> = std::result::Result<T, WorkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn test_invalid_response_carries_url() {
        let err = WorkerError::invalid_response("http://farm:8080/api/me", ResponseFailure::EmptyBody);

        assert!(err.is_invalid_response());
        assert_eq!(err.url(), Some("http://farm:8080/api/me"));
        assert_eq!(
            err.to_string(),
            "Invalid response from http://farm:8080/api/me: empty response body"
        );
    }

    #[test]
    fn test_source_is_preserved() {
        let err = WorkerError::invalid_response("http://farm/api/me", ResponseFailure::Decode(decode_error()));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().starts_with("malformed JSON"));
    }

    #[test]
    fn test_is_recoverable() {
        let server = WorkerError::invalid_response(
            "http://farm/api/me",
            ResponseFailure::Status(StatusCode::INTERNAL_SERVER_ERROR),
        );
        assert!(server.is_recoverable());

        let not_found = WorkerError::invalid_response(
            "http://farm/api/me",
            ResponseFailure::Status(StatusCode::NOT_FOUND),
        );
        assert!(!not_found.is_recoverable());

        let decode = WorkerError::invalid_response("http://farm/api/me", ResponseFailure::Decode(decode_error()));
        assert!(!decode.is_recoverable());
    }

    #[test]
    fn test_config_error_has_no_url() {
        let err: WorkerError = ConfigError::MissingField {
            field: "host".to_string(),
        }
        .into();

        assert!(!err.is_invalid_response());
        assert!(err.url().is_none());
        assert!(!err.is_recoverable());
    }
}
