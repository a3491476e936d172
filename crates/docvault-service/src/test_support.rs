//! Fakes shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::events::AuditEvent;
use docvault_core::result::AppResult;
use docvault_database::memory::MemoryDocumentStore;
use docvault_entity::user::UserRole;

use crate::audit::AuditSink;
use crate::context::RequestContext;
use crate::document::DocumentService;

/// Sink that remembers every event it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingSink {
    async fn enqueue(&self, event: &AuditEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Sink whose backend is always unreachable.
#[derive(Debug, Default)]
pub struct FailingSink;

#[async_trait]
impl AuditSink for FailingSink {
    async fn enqueue(&self, _event: &AuditEvent) -> AppResult<()> {
        Err(AppError::internal("queue backend unreachable"))
    }
}

pub fn actor(role: UserRole) -> RequestContext {
    RequestContext::new(Uuid::new_v4(), "someone@example.com", role)
}

pub fn document_service() -> (DocumentService, Arc<MemoryDocumentStore>, Arc<RecordingSink>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let sink = Arc::new(RecordingSink::default());
    let service = DocumentService::new(store.clone(), sink.clone());
    (service, store, sink)
}
