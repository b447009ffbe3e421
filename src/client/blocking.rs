//! Blocking client for the MyParser management API
//!
//! Same surface as [`super::WorkerClient`], but every call blocks the calling
//! thread until the round trip completes. Like `reqwest::blocking`, it must
//! not be created or used from inside an async runtime.

use reqwest::blocking::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{decode_response, default_headers, fail};
use crate::config::ClientConfig;
use crate::error::{ResponseFailure, Result, WorkerError};
use crate::models::{MeInfo, WorkerInfo};

/// Blocking client for one worker instance
#[derive(Debug, Clone)]
pub struct WorkerClient {
    config: ClientConfig,
    http_client: Client,
}

impl WorkerClient {
    /// Create a new blocking worker client
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
    pub fn me(&self) -> Result<MeInfo> {
        self.request(Method::GET, "me", None::<&()>)
    }

    /// Every worker registered in the farm, in server order
    pub fn workers(&self) -> Result<Vec<WorkerInfo>> {
        self.request(Method::GET, "workers", None::<&()>)
    }

    /// Send a request to `/api/{path}` and decode the JSON answer
    pub fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
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
            .map_err(|e| fail(&url, ResponseFailure::Transport(e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .map_err(|e| fail(&url, ResponseFailure::Transport(e)))?;

        decode_response(&url, status, &bytes)
    }
}
