//! myparser - Client for the MyParser parsing-farm management API
//!
//! Queries a worker instance for its own status and for the fleet of workers
//! registered in the farm.
//!
//! # Architecture
//!
//! - [`client`] - Async and blocking worker clients
//! - [`models`] - Typed API responses
//! - [`config`] - Connection and tool configuration
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use myparser::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = WorkerClient::new(ClientConfig::new("127.0.0.1:8080"))?;
//!
//!     for worker in client.workers().await? {
//!         println!("{} working={}", worker.address(), worker.working);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::WorkerClient;
    pub use crate::config::{ClientConfig, Config};
    pub use crate::error::{ResponseFailure, Result, WorkerError};
    pub use crate::models::{Acquired, FleetStats, MeInfo, MemoryInfo, Summary, WorkerInfo};
}

// Direct re-exports for convenience
pub use client::WorkerClient;
pub use config::ClientConfig;
pub use error::WorkerError;
pub use models::{MeInfo, WorkerInfo};
