//! Audit job handler: records document mutations in the log.

use async_trait::async_trait;

use docvault_core::events::{AuditAction, AuditEvent};
use docvault_entity::job::Job;

use crate::executor::{JobExecutionError, JobHandler};

/// Logs one kind of document audit event.
#[derive(Debug, Clone, Copy)]
pub struct AuditJobHandler {
    action: AuditAction,
}

impl AuditJobHandler {
    /// Create a handler for the given action.
    pub fn new(action: AuditAction) -> Self {
        Self { action }
    }

    fn noun(&self) -> &'static str {
        match self.action {
            AuditAction::Create => "creation",
            AuditAction::Update => "update",
            AuditAction::Delete => "deletion",
        }
    }
}

#[async_trait]
impl JobHandler for AuditJobHandler {
    fn job_type(&self) -> &str {
        self.action.event_name()
    }

    async fn execute(&self, job: &Job) -> Result<(), JobExecutionError> {
        let event: AuditEvent = serde_json::from_value(job.payload.clone()).map_err(|e| {
            JobExecutionError::Permanent(format!("Malformed audit payload: {e}"))
        })?;

        if event.action != self.action {
            return Err(JobExecutionError::Permanent(format!(
                "Audit payload action {} does not match job type '{}'",
                event.action, job.job_type
            )));
        }

        match &event.changes {
            Some(changes) => tracing::info!(
                document_id = %event.document_id,
                user_id = %event.user_id,
                changes = %changes,
                timestamp = %event.timestamp,
                "Processing document {}: {} by user {}",
                self.noun(),
                event.document_id,
                event.user_id
            ),
            None => tracing::info!(
                document_id = %event.document_id,
                user_id = %event.user_id,
                timestamp = %event.timestamp,
                "Processing document {}: {} by user {}",
                self.noun(),
                event.document_id,
                event.user_id
            ),
        }

        tracing::info!(
            document_id = %event.document_id,
            "Document {} {} processed successfully",
            self.noun(),
            event.document_id
        );
        Ok(())
    }
}
