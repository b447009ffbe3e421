//! Configuration management for the MyParser client
//!
//! [`ClientConfig`] is the connection triple handed to a worker client. The
//! library never looks anywhere else for it. [`Config`] wraps it together with
//! logging settings for the command-line tool, which loads it from a TOML file
//! or from environment variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the worker host
pub const ENV_HOST: &str = "MYPARSER_HOST";
/// Environment variable holding the basic-auth username
pub const ENV_USERNAME: &str = "MYPARSER_USERNAME";
/// Environment variable holding the basic-auth password
pub const ENV_PASSWORD: &str = "MYPARSER_PASSWORD";
/// Environment variable holding the log level
pub const ENV_LOG_LEVEL: &str = "MYPARSER_LOG_LEVEL";
/// Environment variable holding the log format
pub const ENV_LOG_FORMAT: &str = "MYPARSER_LOG_FORMAT";

/// Connection parameters of a worker instance
///
/// `host` may carry a port (`"10.0.0.5:8080"`). Requests go to
/// `http://{host}/api/{path}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Worker host, optionally with a port
    pub host: String,

    /// Basic-auth username (empty for none)
    #[serde(default)]
    pub username: String,

    /// Basic-auth password (empty for none)
    #[serde(default)]
    pub password: String,
}

impl ClientConfig {
    /// Create a config without credentials
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: String::new(),
            password: String::new(),
        }
    }

    /// Set basic-auth credentials
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Whether an `Authorization` header will be sent
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// Full URL of an API path
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("http://{}/api/{}", self.host, path.trim_start_matches('/'))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.host.trim();

        if host.is_empty() {
            return Err(ConfigError::MissingField {
                field: "host".to_string(),
            });
        }

        if host.contains("://") {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                reason: format!("expected host[:port] without a scheme, got '{host}'"),
            });
        }

        if host.contains('/') || self.host.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                reason: format!("'{host}' is not a valid host"),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field(
                "password",
                &if self.password.is_empty() { "" } else { "<redacted>" },
            )
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("text")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Configuration of the command-line tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Worker connection
    pub worker: ClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// A missing host is left empty; [`Config::validate`] reports it once
    /// command-line overrides have been applied.
    pub fn from_env() -> Self {
        let host = std::env::var(ENV_HOST).unwrap_or_default();
        let username = std::env::var(ENV_USERNAME).unwrap_or_default();
        let password = std::env::var(ENV_PASSWORD).unwrap_or_default();

        let level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| default_log_level());
        let format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| default_log_format());

        Self {
            worker: ClientConfig::new(host).with_credentials(username, password),
            logging: LoggingConfig { level, format },
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.worker.validate()?;

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format".to_string(),
                reason: format!("expected 'text' or 'json', got '{}'", self.logging.format),
            });
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
