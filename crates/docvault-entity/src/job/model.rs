//! Job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::JobStatus;

/// A queued background job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    /// Unique job identifier.
    pub id: Uuid,
    /// Job type identifier (e.g. `"document-created"`).
    pub job_type: String,
    /// Queue name.
    pub queue: String,
    /// Job-specific payload (JSON).
    pub payload: serde_json::Value,
    /// Error message of the last failed attempt.
    pub error_message: Option<String>,
    /// Current job status.
    pub status: JobStatus,
    /// Number of execution attempts started so far.
    pub attempts: i32,
    /// Maximum allowed attempts.
    pub max_attempts: i32,
    /// Earliest execution time.
    pub scheduled_at: DateTime<Utc>,
    /// When the current attempt started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state.
    pub completed_at: Option<DateTime<Utc>>,
    /// Worker ID that claimed the job.
    pub worker_id: Option<String>,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Check if another attempt is allowed after the current one fails.
    pub fn can_retry(&self) -> bool {
        self.attempts < self.max_attempts
    }
}

/// Data required to enqueue a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJob {
    /// Job type identifier.
    pub job_type: String,
    /// Queue name.
    pub queue: String,
    /// Job-specific payload.
    pub payload: serde_json::Value,
    /// Maximum attempts.
    pub max_attempts: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_retry_until_max_attempts() {
        let now = Utc::now();
        let mut job = Job {
            id: Uuid::new_v4(),
            job_type: "document-created".into(),
            queue: "documents".into(),
            payload: serde_json::json!({}),
            error_message: None,
            status: JobStatus::Running,
            attempts: 1,
            max_attempts: 3,
            scheduled_at: now,
            started_at: Some(now),
            completed_at: None,
            worker_id: Some("w1".into()),
            created_at: now,
            updated_at: now,
        };
        assert!(job.can_retry());
        job.attempts = 3;
        assert!(!job.can_retry());
    }
}
