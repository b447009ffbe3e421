//! Response types of the MyParser management API
//!
//! Field names follow the JSON payloads one to one. Every field is required;
//! a payload missing one fails to decode instead of being defaulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Memory figures reported by a worker, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub free: u64,
    pub total: u64,
}

impl MemoryInfo {
    /// Memory in use
    #[must_use]
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    /// Share of memory in use, between 0.0 and 1.0
    #[must_use]
    pub fn usage_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used() as f64 / self.total as f64
    }
}

/// Farm-wide counters as seen by a worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub domains: u64,
    pub proxies: u64,
    pub workers: u64,
    pub tasks: u64,
}

/// Status of the worker answering the request (`GET /api/me`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeInfo {
    pub worker_id: u64,
    pub threads: u32,
    pub working: bool,
    pub memory: MemoryInfo,
    pub summary: Summary,
}

/// Resources currently held by a worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acquired {
    pub queries: u64,
    pub proxies: u64,
}

/// One registered worker (`GET /api/workers`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerInfo {
    pub id: u64,
    pub host: String,
    pub port: u16,
    pub threads: u32,
    pub working: bool,
    pub memory: MemoryInfo,
    pub acquired: Acquired,
    /// Unix timestamp of the last heartbeat
    pub updated_at: i64,
    /// Unix timestamp of registration
    pub connected_at: i64,
}

impl WorkerInfo {
    /// `host:port` of the worker
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.updated_at, 0)
    }

    #[must_use]
    pub fn connected_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.connected_at, 0)
    }
}

/// Aggregated figures over a fleet of workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    pub workers: usize,
    pub working: usize,
    pub threads: u64,
    pub memory: MemoryInfo,
}

impl FleetStats {
    /// Sum up a list of workers
    pub fn from_workers(workers: &[WorkerInfo]) -> Self {
        workers.iter().fold(Self::default(), |mut stats, worker| {
            stats.workers += 1;
            if worker.working {
                stats.working += 1;
            }
            stats.threads += u64::from(worker.threads);
            stats.memory.free = stats.memory.free.saturating_add(worker.memory.free);
            stats.memory.total = stats.memory.total.saturating_add(worker.memory.total);
            stats
        })
    }

    /// Workers registered but idle
    #[must_use]
    pub fn idle(&self) -> usize {
        self.workers - self.working
    }
}
