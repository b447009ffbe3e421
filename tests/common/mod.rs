//! Common test utilities

#![allow(dead_code)]

use myparser::models::{Acquired, MemoryInfo, WorkerInfo};

/// `/api/me` payload of a busy worker
pub const ME_JSON: &str = r#"{"worker_id":1,"threads":4,"working":true,"memory":{"free":100,"total":200},"summary":{"domains":1,"proxies":2,"workers":3,"tasks":4}}"#;

/// `/api/workers` payload with a single worker
pub const WORKERS_JSON: &str = r#"[{"id":7,"host":"10.0.0.5","port":8080,"threads":8,"working":false,"memory":{"free":1024,"total":4096},"acquired":{"queries":12,"proxies":3},"updated_at":1700000000,"connected_at":1699990000}]"#;

/// The worker described by [`WORKERS_JSON`]
pub fn expected_worker() -> WorkerInfo {
    WorkerInfo {
        id: 7,
        host: "10.0.0.5".to_string(),
        port: 8080,
        threads: 8,
        working: false,
        memory: MemoryInfo {
            free: 1024,
            total: 4096,
        },
        acquired: Acquired {
            queries: 12,
            proxies: 3,
        },
        updated_at: 1_700_000_000,
        connected_at: 1_699_990_000,
    }
}

/// base64("admin:secret")
pub const ADMIN_SECRET_AUTH: &str = "Basic YWRtaW46c2VjcmV0";
