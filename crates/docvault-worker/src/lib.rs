//! Background audit processing for docvault.
//!
//! This crate provides:
//! - A Postgres-backed job queue that doubles as the durable audit sink
//! - A job executor that dispatches jobs to the handler for their type
//! - A worker runner that polls the queue and retries transient failures
//! - The audit job handlers, which record each event in the log

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use queue::JobQueue;
pub use runner::WorkerRunner;

/// Queue name used for document audit jobs.
pub const DOCUMENTS_QUEUE: &str = "documents";

/// Executor with an audit handler registered for every audit action.
pub fn audit_executor() -> JobExecutor {
    let mut executor = JobExecutor::new();
    for action in docvault_core::events::AuditAction::all() {
        executor.register(std::sync::Arc::new(jobs::AuditJobHandler::new(action)));
    }
    executor
}
