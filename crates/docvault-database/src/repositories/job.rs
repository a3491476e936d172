//! Job repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::job::{CreateJob, Job};

/// Repository backing the durable job queue.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Create a new job repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending job.
    pub async fn create(&self, data: &CreateJob) -> AppResult<Job> {
        sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (job_type, queue, payload, max_attempts) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.job_type)
        .bind(&data.queue)
        .bind(&data.payload)
        .bind(data.max_attempts)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create job", e))
    }

    /// Claim the oldest due job of a queue (SKIP LOCKED for concurrency).
    pub async fn claim_next(&self, queue: &str, worker_id: &str) -> AppResult<Option<Job>> {
        sqlx::query_as::<_, Job>(
            "UPDATE jobs SET status = 'running', started_at = NOW(), worker_id = $2, \
             attempts = attempts + 1, updated_at = NOW() \
             WHERE id = ( \
                SELECT id FROM jobs \
                WHERE queue = $1 AND status = 'pending' AND scheduled_at <= NOW() \
                ORDER BY scheduled_at ASC, created_at ASC \
                LIMIT 1 \
                FOR UPDATE SKIP LOCKED \
             ) RETURNING *",
        )
        .bind(queue)
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim job", e))
    }

    /// Mark a job as completed.
    pub async fn mark_completed(&self, job_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE jobs SET status = 'completed', error_message = NULL, \
             completed_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(job_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete job", e))?;
        Ok(())
    }

    /// Mark a job as failed for good.
    pub async fn mark_failed(&self, job_id: Uuid, error_message: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE jobs SET status = 'failed', error_message = $2, \
             completed_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(job_id)
        .bind(error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark job as failed", e)
        })?;
        Ok(())
    }

    /// Put a running job back to pending, runnable again at `run_at`.
    pub async fn reschedule(
        &self,
        job_id: Uuid,
        error_message: &str,
        run_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE jobs SET status = 'pending', error_message = $2, scheduled_at = $3, \
             started_at = NULL, worker_id = NULL, updated_at = NOW() \
             WHERE id = $1 AND status = 'running'",
        )
        .bind(job_id)
        .bind(error_message)
        .bind(run_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reschedule job", e))?;
        Ok(())
    }

    /// Re-queue jobs stuck in `running` since before `started_before`.
    pub async fn requeue_stale(&self, started_before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE jobs SET status = 'pending', started_at = NULL, worker_id = NULL, \
             updated_at = NOW() \
             WHERE status = 'running' AND started_at < $1",
        )
        .bind(started_before)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to requeue stale jobs", e)
        })?;
        Ok(result.rows_affected())
    }
}
