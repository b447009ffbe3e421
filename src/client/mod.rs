//! Client for the MyParser management API
//!
//! [`WorkerClient`] talks to a single worker instance over plain HTTP and
//! decodes its JSON answers into the types of [`crate::models`]. A blocking
//! flavour with the same surface lives in [`blocking`].
//!
//! # Endpoints
//!
//! ```text
//! GET /api/me       -> MeInfo
//! GET /api/workers  -> [WorkerInfo]
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use myparser::client::WorkerClient;
//! use myparser::config::ClientConfig;
//!
//! # async fn run() -> myparser::error::Result<()> {
//! let config = ClientConfig::new("10.0.0.5:8080").with_credentials("admin", "secret");
//! let client = WorkerClient::new(config)?;
//!
//! let me = client.me().await?;
//! println!("worker #{} runs {} threads", me.worker_id, me.threads);
//! # Ok(())
//! # }
//! ```

pub mod blocking;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ResponseFailure, Result, WorkerError};
use crate::models::{MeInfo, WorkerInfo};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!(
    "MyParser/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/QUAD69/MyParser) Rust"
);

/// Headers common to every request
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn fail(url: &str, cause: ResponseFailure) -> WorkerError {
    let err = WorkerError::invalid_response(url, cause);
    tracing::warn!(url = %url, error = %err, "Worker API request failed");
    err
}

/// Turn a raw response into the expected value
fn decode_response<T: DeserializeOwned>(url: &str, status: StatusCode, body: &[u8]) -> Result<T> {
    if !status.is_success() {
        return Err(fail(url, ResponseFailure::Status(status)));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(fail(url, ResponseFailure::EmptyBody));
    }

    serde_json::from_slice(body).map_err(|e| fail(url, ResponseFailure::Decode(e)))
}

/// Async client for one worker instance
///
/// Holds only immutable configuration and a shareable HTTP handle, so it can
/// be cloned or shared between tasks freely.
#[derive(Debug, Clone)]
pub struct WorkerClient {
    config: ClientConfig,
    http_client: Client,
}

impl WorkerClient {
    /// Create a new worker client
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Config` if the host is missing or malformed and
    /// `WorkerError::Init` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .default_headers(default_headers())
            .build()
            .map_err(WorkerError::Init)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn username(&self) -> &str {
        &self.config.username
    }

    pub fn password(&self) -> &str {
        &self.config.password
    }

    /// Status of the worker this client points at
    pub async fn me(&self) -> Result<MeInfo> {
        self.get("me").await
    }

    /// Every worker registered in the farm, in server order
    pub async fn workers(&self) -> Result<Vec<WorkerInfo>> {
        self.get("workers").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// Send a request to `/api/{path}` and decode the JSON answer
    ///
    /// `T` may be [`serde_json::Value`] for endpoints without a typed model.
    /// A supplied `body` is sent as JSON.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::InvalidResponse` on transport failure, a
    /// non-success status, an empty body or a body that does not decode as `T`.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        tracing::debug!(method = %method, url = %url, "Sending worker API request");

        let mut builder = self.http_client.request(method, &url);

        if self.config.has_credentials() {
            builder = builder.basic_auth(&self.config.username, Some(&self.config.password));
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| fail(&url, ResponseFailure::Transport(e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| fail(&url, ResponseFailure::Transport(e)))?;

        tracing::debug!(url = %url, status = %status, bytes = bytes.len(), "Received worker API response");

        decode_response(&url, status, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("MyParser/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[reqwest::header::USER_AGENT], USER_AGENT);
        assert!(!headers.contains_key(reqwest::header::AUTHORIZATION));
    }

    #[test]
    fn test_decode_success() {
        let value: serde_json::Value = decode_response("http://h/api/x", StatusCode::OK, br#"{"a":1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_decode_rejects_status() {
        let err = decode_response::<serde_json::Value>("http://h/api/x", StatusCode::NOT_FOUND, b"{}").unwrap_err();
        assert!(matches!(
            err,
            WorkerError::InvalidResponse {
                cause: ResponseFailure::Status(StatusCode::NOT_FOUND),
                ..
            }
        ));
    }

    #[test]
    fn test_decode_rejects_blank_body() {
        let err = decode_response::<serde_json::Value>("http://h/api/x", StatusCode::OK, b" \n").unwrap_err();
        assert!(matches!(
            err,
            WorkerError::InvalidResponse {
                cause: ResponseFailure::EmptyBody,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let err = decode_response::<MeInfo>("http://h/api/me", StatusCode::OK, br#"{"worker_id":1}"#).unwrap_err();
        assert_eq!(err.url(), Some("http://h/api/me"));
        assert!(matches!(
            err,
            WorkerError::InvalidResponse {
                cause: ResponseFailure::Decode(_),
                ..
            }
        ));
    }

    #[test]
    fn test_client_creation() {
        let client = WorkerClient::new(ClientConfig::new("localhost:8080").with_credentials("admin", "secret")).unwrap();
        assert_eq!(client.host(), "localhost:8080");
        assert_eq!(client.username(), "admin");
        assert_eq!(client.password(), "secret");
    }

    #[test]
    fn test_client_rejects_empty_host() {
        let result = WorkerClient::new(ClientConfig::new(""));
        assert!(matches!(result, Err(WorkerError::Config(_))));
    }
}
