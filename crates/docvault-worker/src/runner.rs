//! Worker runner: main loop that polls for jobs and executes them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, watch};
use tokio::time;

use docvault_core::config::WorkerConfig;
use docvault_entity::job::Job;

use crate::executor::{JobExecutionError, JobExecutor};
use crate::queue::JobQueue;

/// What to do with a job once its handler returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Mark completed.
    Complete,
    /// Reschedule with backoff.
    Retry(String),
    /// Mark failed for good.
    Fail(String),
}

impl Disposition {
    /// Decide the disposition from the handler result and attempts so far.
    pub fn decide(job: &Job, result: &Result<(), JobExecutionError>) -> Self {
        match result {
            Ok(()) => Self::Complete,
            Err(JobExecutionError::Transient(msg)) if job.can_retry() => Self::Retry(msg.clone()),
            Err(JobExecutionError::Transient(msg)) => {
                Self::Fail(format!("{msg} (gave up after {} attempts)", job.attempts))
            }
            Err(e @ JobExecutionError::Permanent(_)) => Self::Fail(e.to_string()),
            Err(JobExecutionError::Internal(err)) if job.can_retry() => {
                Self::Retry(err.to_string())
            }
            Err(JobExecutionError::Internal(err)) => Self::Fail(err.to_string()),
        }
    }
}

/// Main worker runner that polls the queue and executes jobs
#[derive(Debug)]
pub struct WorkerRunner {
    queue: Arc<JobQueue>,
    executor: Arc<JobExecutor>,
    config: WorkerConfig,
}

impl WorkerRunner {
    /// Create a new worker runner
    pub fn new(queue: Arc<JobQueue>, executor: Arc<JobExecutor>, config: WorkerConfig) -> Self {
        Self {
            queue,
            executor,
            config,
        }
    }

    /// Run until the cancel signal is received
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            worker_id = %self.queue.worker_id(),
            concurrency = self.config.concurrency,
            poll_interval_ms = self.config.poll_interval_ms,
            "Worker started"
        );

        match self
            .queue
            .recover_stale(chrono::Duration::seconds(self.config.stale_after_seconds))
            .await
        {
            Ok(0) => {}
            Ok(n) => tracing::warn!(count = n, "Re-queued stale running jobs"),
            Err(e) => tracing::error!(error = %e, "Failed to recover stale jobs"),
        }

        let concurrency = self.config.concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency as usize));
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);

        loop {
            let claimed = tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Worker received shutdown signal");
                        break;
                    }
                    continue;
                }
                claimed = self.poll_and_execute(&semaphore) => claimed,
            };

            if claimed {
                continue;
            }

            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Worker shutting down");
                        break;
                    }
                }
                _ = time::sleep(poll_interval) => {}
            }
        }

        tracing::info!("Worker waiting for in-flight jobs to complete");
        let _ = time::timeout(Duration::from_secs(30), semaphore.acquire_many(concurrency)).await;
        tracing::info!("Worker shut down complete");
    }

    /// Claim one job and spawn its execution. Returns whether a job was claimed.
    async fn poll_and_execute(&self, semaphore: &Arc<Semaphore>) -> bool {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            return false;
        };

        let job = match self.queue.dequeue().await {
            Ok(Some(job)) => job,
            Ok(None) => {
                tracing::trace!("No jobs available");
                return false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to dequeue job");
                return false;
            }
        };

        let queue = Arc::clone(&self.queue);
        let executor = Arc::clone(&self.executor);

        tokio::spawn(async move {
            let _permit = permit;
            let result = executor.execute(&job).await;

            let outcome = match Disposition::decide(&job, &result) {
                Disposition::Complete => {
                    tracing::debug!(job_id = %job.id, job_type = %job.job_type, "Job completed");
                    queue.complete(job.id).await
                }
                Disposition::Retry(msg) => {
                    tracing::warn!(
                        job_id = %job.id,
                        attempt = job.attempts,
                        max_attempts = job.max_attempts,
                        error = %msg,
                        "Job failed, will retry"
                    );
                    queue.retry(&job, &msg).await
                }
                Disposition::Fail(msg) => {
                    tracing::error!(job_id = %job.id, error = %msg, "Job failed permanently");
                    queue.fail(job.id, &msg).await
                }
            };

            if let Err(e) = outcome {
                tracing::error!(job_id = %job.id, error = %e, "Failed to record job outcome");
            }
        });

        true
    }
}
