//! Durable job queue over the `jobs` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::events::AuditEvent;
use docvault_core::result::AppResult;
use docvault_database::repositories::JobRepository;
use docvault_entity::job::{CreateJob, Job};
use docvault_service::audit::AuditSink;

/// Base delay between retries; attempt `n` waits `n` times this.
const RETRY_BASE_DELAY_SECONDS: i64 = 5;

/// Job queue for enqueuing and claiming work.
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job repository for persistence.
    repo: Arc<JobRepository>,
    /// Worker identifier recorded on claimed jobs.
    worker_id: String,
    /// Queue this instance enqueues to and polls.
    queue: String,
    /// Attempts before a job is marked failed.
    max_attempts: i32,
}

impl JobQueue {
    /// Create a new job queue
    pub fn new(
        repo: Arc<JobRepository>,
        worker_id: impl Into<String>,
        queue: impl Into<String>,
        max_attempts: i32,
    ) -> Self {
        Self {
            repo,
            worker_id: worker_id.into(),
            queue: queue.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Worker identifier.
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Enqueue a new job
    pub async fn enqueue(&self, job_type: &str, payload: serde_json::Value) -> AppResult<Job> {
        let job = self
            .repo
            .create(&CreateJob {
                job_type: job_type.to_string(),
                queue: self.queue.clone(),
                payload,
                max_attempts: self.max_attempts,
            })
            .await?;

        tracing::debug!(
            job_id = %job.id,
            job_type = %job.job_type,
            queue = %job.queue,
            "Enqueued job"
        );
        Ok(job)
    }

    /// Claim the next due job, if any
    pub async fn dequeue(&self) -> AppResult<Option<Job>> {
        self.repo.claim_next(&self.queue, &self.worker_id).await
    }

    /// Mark a job as completed successfully
    pub async fn complete(&self, job_id: Uuid) -> AppResult<()> {
        self.repo.mark_completed(job_id).await
    }

    /// Mark a job as failed
    pub async fn fail(&self, job_id: Uuid, error: &str) -> AppResult<()> {
        self.repo.mark_failed(job_id, error).await
    }

    /// Put a job back in the queue after a transient failure
    pub async fn retry(&self, job: &Job, error: &str) -> AppResult<()> {
        let run_at = Utc::now() + retry_delay(job.attempts);
        self.repo.reschedule(job.id, error, run_at).await?;
        tracing::debug!(job_id = %job.id, run_at = %run_at, "Job rescheduled");
        Ok(())
    }

    /// Re-queue jobs whose worker disappeared mid-execution
    pub async fn recover_stale(&self, stale_after: Duration) -> AppResult<u64> {
        self.repo.requeue_stale(Utc::now() - stale_after).await
    }
}

/// Linear backoff for the given number of attempts already made.
pub fn retry_delay(attempts: i32) -> Duration {
    Duration::seconds(RETRY_BASE_DELAY_SECONDS * i64::from(attempts.max(1)))
}

#[async_trait]
impl AuditSink for JobQueue {
    async fn enqueue(&self, event: &AuditEvent) -> AppResult<()> {
        let payload = serde_json::to_value(event)?;
        JobQueue::enqueue(self, event.event_name(), payload)
            .await
            .map(|_| ())
            .map_err(|e| AppError::internal(format!("Failed to enqueue audit event: {e}")))
    }
}
