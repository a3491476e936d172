//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Audit job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Run the job worker inside the server process. When disabled, audit
    /// events are written straight to the log instead of being queued.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum number of jobs executing concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
    /// Delay between polls when the queue is empty, in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Attempts before a job is marked failed.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
    /// Running jobs older than this are re-queued at startup.
    #[serde(default = "default_stale_after")]
    pub stale_after_seconds: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            concurrency: default_concurrency(),
            poll_interval_ms: default_poll_interval(),
            max_attempts: default_max_attempts(),
            stale_after_seconds: default_stale_after(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_concurrency() -> u32 {
    4
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_max_attempts() -> i32 {
    3
}

fn default_stale_after() -> i64 {
    300
}
