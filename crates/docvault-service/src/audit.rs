//! Audit sink abstraction.
//!
//! The document core hands every [`AuditEvent`] to an [`AuditSink`] after
//! the store write has committed. Sinks may fail; the core logs and drops
//! such failures so they never reach the caller.

use async_trait::async_trait;
use tracing::info;

use docvault_core::events::AuditEvent;
use docvault_core::result::AppResult;

/// Destination for audit events.
#[async_trait]
pub trait AuditSink: Send + Sync + std::fmt::Debug + 'static {
    /// Hand an event over for asynchronous processing.
    ///
    /// The event name is `event.event_name()` (`document-created`, ...).
    async fn enqueue(&self, event: &AuditEvent) -> AppResult<()>;
}

/// Sink that records events directly in the log.
///
/// Used when the background worker is disabled.
#[derive(Debug, Clone, Default)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn enqueue(&self, event: &AuditEvent) -> AppResult<()> {
        info!(
            event = event.event_name(),
            document_id = %event.document_id,
            user_id = %event.user_id,
            action = %event.action,
            changes = ?event.changes,
            timestamp = %event.timestamp,
            "Audit event"
        );
        Ok(())
    }
}
