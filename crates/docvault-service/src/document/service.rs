//! Document CRUD with owner-or-admin access control and audit publishing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use docvault_core::config::StorageConfig;
use docvault_core::error::AppError;
use docvault_core::events::AuditEvent;
use docvault_database::store::DocumentStore;
use docvault_entity::document::{CreateDocument, Document, DocumentPatch, FileAttachment};
use docvault_storage::is_upload_key;

use crate::audit::AuditSink;
use crate::context::RequestContext;

/// Input for creating a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDocumentInput {
    /// Title. Must not be blank.
    pub title: String,
    /// Body text. May only be empty when a file is attached.
    pub content: String,
    /// Attached file metadata.
    pub file: Option<FileAttachment>,
    /// Owner requested by the client. Ignored: the actor always owns what
    /// they create.
    pub user_id: Option<Uuid>,
}

/// Mediates every document read and mutation.
///
/// Reads and writes by id pass the same gate: the row must exist
/// (`NotFound`) and the actor must own it or be an admin (`Forbidden`).
/// Each mutation performs one store write and then one audit publish;
/// publish failures are logged and never change the result.
///
/// Attached files must live under the upload directory with a
/// server-generated name; any other path is rejected on create.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document store.
    store: Arc<dyn DocumentStore>,
    /// Audit event destination.
    audit: Arc<dyn AuditSink>,
    /// Storage key prefix every attached file must sit under.
    upload_dir: String,
}

impl DocumentService {
    /// Creates a new document service using the default upload directory.
    pub fn new(store: Arc<dyn DocumentStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            store,
            audit,
            upload_dir: StorageConfig::default().upload_dir,
        }
    }

    /// Sets the upload directory attached files are confined to.
    pub fn with_upload_dir(mut self, upload_dir: impl Into<String>) -> Self {
        self.upload_dir = upload_dir.into();
        self
    }

    /// Storage key prefix of attached files.
    pub fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    /// Creates a document owned by the actor and publishes a `CREATE` event.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateDocumentInput,
    ) -> Result<Document, AppError> {
        if input.title.trim().is_empty() {
            return Err(AppError::validation("title should not be empty"));
        }
        if input.content.is_empty() && input.file.is_none() {
            return Err(AppError::validation("content should not be empty"));
        }
        if let Some(file) = &input.file {
            if !is_upload_key(&self.upload_dir, &file.file_path) {
                warn!(
                    user_id = %ctx.user_id,
                    file_path = %file.file_path,
                    "Rejected document with a file outside the upload directory"
                );
                return Err(AppError::validation(
                    "filePath must reference an uploaded file",
                ));
            }
        }
        if let Some(requested) = input.user_id.filter(|id| *id != ctx.user_id) {
            debug!(
                user_id = %ctx.user_id,
                requested_owner = %requested,
                "Ignoring client-supplied document owner"
            );
        }

        let document = self
            .store
            .create(&CreateDocument {
                title: input.title,
                content: input.content,
                file: input.file,
                user_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            has_file = document.file.is_some(),
            "Document created"
        );

        self.publish(AuditEvent::created(document.id, ctx.user_id))
            .await;
        Ok(document)
    }

    /// Lists the actor's own documents, newest first.
    ///
    /// Always scoped to the actor, admins included.
    pub async fn list_own(&self, ctx: &RequestContext) -> Result<Vec<Document>, AppError> {
        self.store.list_by_owner(ctx.user_id).await
    }

    /// Fetches a document through the owner-or-admin gate.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Document, AppError> {
        let document = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if !document.is_owned_by(ctx.user_id) && !ctx.is_admin() {
            warn!(
                user_id = %ctx.user_id,
                document_id = %id,
                "Document access denied"
            );
            return Err(AppError::forbidden(
                "You do not have permission to access this document",
            ));
        }

        Ok(document)
    }

    /// Applies a partial update after the gate and publishes an `UPDATE`
    /// event carrying the patch exactly as submitted.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: DocumentPatch,
    ) -> Result<Document, AppError> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("title should not be empty"));
        }

        let existing = self.get(ctx, id).await?;
        let changes = serde_json::to_value(&patch)?;

        let updated = self
            .store
            .update(id, &patch)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(
            user_id = %ctx.user_id,
            document_id = %id,
            owner_id = %existing.user_id,
            "Document updated"
        );

        self.publish(AuditEvent::updated(id, existing.user_id, changes))
            .await;
        Ok(updated)
    }

    /// Deletes a document after the gate and publishes a `DELETE` event.
    ///
    /// Returns the row as it was before deletion.
    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> Result<Document, AppError> {
        let existing = self.get(ctx, id).await?;

        let removed = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(
            user_id = %ctx.user_id,
            document_id = %id,
            owner_id = %existing.user_id,
            "Document removed"
        );

        self.publish(AuditEvent::deleted(id, existing.user_id))
            .await;
        Ok(removed)
    }

    async fn publish(&self, event: AuditEvent) {
        if let Err(e) = self.audit.enqueue(&event).await {
            warn!(
                event = event.event_name(),
                document_id = %event.document_id,
                error = %e,
                "Failed to publish audit event"
            );
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Document with ID {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_core::error::ErrorKind;
    use docvault_core::events::AuditAction;
    use docvault_database::memory::MemoryDocumentStore;
    use docvault_entity::user::UserRole;
    use serde_json::json;

    use crate::test_support::{FailingSink, actor, document_service};

    fn input(title: &str, content: &str) -> CreateDocumentInput {
        CreateDocumentInput {
            title: title.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    fn title_patch(title: &str) -> DocumentPatch {
        DocumentPatch {
            title: Some(title.to_string()),
            content: None,
        }
    }

    #[tokio::test]
    async fn test_owner_can_read_created_document() {
        let (service, _, _) = document_service();
        let owner = actor(UserRole::User);

        let doc = service.create(&owner, input("T", "C")).await.unwrap();
        assert_eq!(doc.title, "T");
        assert_eq!(doc.content, "C");
        assert_eq!(doc.user_id, owner.user_id);

        assert_eq!(service.get(&owner, doc.id).await.unwrap(), doc);
    }

    #[tokio::test]
    async fn test_create_forces_owner_to_actor() {
        let (service, _, sink) = document_service();
        let owner = actor(UserRole::User);
        let victim = Uuid::new_v4();

        let doc = service
            .create(
                &owner,
                CreateDocumentInput {
                    user_id: Some(victim),
                    ..input("T", "C")
                },
            )
            .await
            .unwrap();

        assert_eq!(doc.user_id, owner.user_id);
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, AuditAction::Create);
        assert_eq!(events[0].user_id, owner.user_id);
        assert_eq!(events[0].document_id, doc.id);
        assert!(events[0].changes.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields_before_store() {
        let (service, store, sink) = document_service();
        let owner = actor(UserRole::User);

        let err = service.create(&owner, input("  ", "C")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = service.create(&owner, input("T", "")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        assert!(store.is_empty());
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_empty_content_allowed_with_file() {
        let (service, _, _) = document_service();
        let owner = actor(UserRole::User);

        let doc = service
            .create(
                &owner,
                CreateDocumentInput {
                    file: Some(FileAttachment {
                        file_name: "a.txt".into(),
                        file_path: docvault_storage::upload_key("uploads", "a.txt"),
                        file_size: 3,
                        mime_type: "text/plain".into(),
                    }),
                    ..input("a.txt", "")
                },
            )
            .await
            .unwrap();
        assert_eq!(doc.content, "");
        assert!(doc.file.is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_file_outside_upload_dir() {
        let (service, store, sink) = document_service();
        let owner = actor(UserRole::User);

        for path in [
            "config/secrets.toml".to_string(),
            ".env".to_string(),
            "uploads/../config/default.toml".to_string(),
            "uploads/report.pdf".to_string(),
            docvault_storage::upload_key("elsewhere", "a.txt"),
        ] {
            let err = service
                .create(
                    &owner,
                    CreateDocumentInput {
                        file: Some(FileAttachment {
                            file_name: "secrets.toml".into(),
                            file_path: path.clone(),
                            file_size: 1,
                            mime_type: "text/plain".into(),
                        }),
                        ..input("T", "C")
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{path}");
            assert_eq!(err.message, "filePath must reference an uploaded file");
        }

        assert!(store.is_empty());
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_upload_dir_is_configurable() {
        let (service, _, _) = document_service();
        let service = service.with_upload_dir("files");
        let owner = actor(UserRole::User);
        let file = |path: String| CreateDocumentInput {
            file: Some(FileAttachment {
                file_name: "a.txt".into(),
                file_path: path,
                file_size: 1,
                mime_type: "text/plain".into(),
            }),
            ..input("T", "C")
        };

        assert!(
            service
                .create(&owner, file(docvault_storage::upload_key("files", "a.txt")))
                .await
                .is_ok()
        );
        let err = service
            .create(&owner, file(docvault_storage::upload_key("uploads", "a.txt")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_other_user_is_forbidden_but_admin_is_not() {
        let (service, _, _) = document_service();
        let owner = actor(UserRole::User);
        let doc = service.create(&owner, input("T", "C")).await.unwrap();

        let stranger = actor(UserRole::User);
        let err = service.get(&stranger, doc.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let admin = actor(UserRole::Admin);
        assert_eq!(service.get(&admin, doc.id).await.unwrap().id, doc.id);
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found_for_every_operation() {
        let (service, _, sink) = document_service();
        let admin = actor(UserRole::Admin);
        let id = Uuid::new_v4();

        assert_eq!(
            service.get(&admin, id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service
                .update(&admin, id, title_patch("x"))
                .await
                .unwrap_err()
                .kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service.remove(&admin, id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_update_leaves_document_unchanged() {
        let (service, _, sink) = document_service();
        let u1 = actor(UserRole::User);
        let u2 = actor(UserRole::User);
        let doc = service.create(&u1, input("T", "C")).await.unwrap();

        let err = service
            .update(&u2, doc.id, title_patch("New"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        assert_eq!(service.get(&u1, doc.id).await.unwrap().title, "T");
        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test]
    async fn test_forbidden_remove_keeps_document() {
        let (service, store, _) = document_service();
        let u1 = actor(UserRole::User);
        let doc = service.create(&u1, input("T", "C")).await.unwrap();

        let err = service
            .remove(&actor(UserRole::User), doc.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_event_carries_literal_patch_and_original_owner() {
        let (service, _, sink) = document_service();
        let owner = actor(UserRole::User);
        let doc = service.create(&owner, input("T", "C")).await.unwrap();

        let admin = actor(UserRole::Admin);
        let updated = service
            .update(&admin, doc.id, title_patch("X"))
            .await
            .unwrap();
        assert_eq!(updated.title, "X");
        assert_eq!(updated.content, "C");
        assert_eq!(updated.user_id, owner.user_id);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        let event = &events[1];
        assert_eq!(event.action, AuditAction::Update);
        assert_eq!(event.document_id, doc.id);
        assert_eq!(event.user_id, owner.user_id);
        assert_eq!(event.changes, Some(json!({"title": "X"})));
    }

    #[tokio::test]
    async fn test_unchanged_values_still_reported_in_changes() {
        let (service, _, sink) = document_service();
        let owner = actor(UserRole::User);
        let doc = service.create(&owner, input("T", "C")).await.unwrap();

        let patch = DocumentPatch {
            title: Some("T".into()),
            content: Some("C".into()),
        };
        service.update(&owner, doc.id, patch).await.unwrap();

        let events = sink.events();
        assert_eq!(
            events[1].changes,
            Some(json!({"title": "T", "content": "C"}))
        );
    }

    #[tokio::test]
    async fn test_blank_title_patch_is_rejected() {
        let (service, _, _) = document_service();
        let owner = actor(UserRole::User);
        let doc = service.create(&owner, input("T", "C")).await.unwrap();

        let err = service
            .update(&owner, doc.id, title_patch(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_remove_returns_tombstone_then_not_found() {
        let (service, _, sink) = document_service();
        let u1 = actor(UserRole::User);
        let doc = service.create(&u1, input("T", "C")).await.unwrap();

        let removed = service.remove(&u1, doc.id).await.unwrap();
        assert_eq!(removed.id, doc.id);
        assert_eq!(removed.title, "T");
        assert_eq!(removed.content, "C");
        assert_eq!(removed.user_id, u1.user_id);

        let err = service.get(&u1, doc.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].action, AuditAction::Delete);
        assert_eq!(events[1].user_id, u1.user_id);
    }

    #[tokio::test]
    async fn test_admin_remove_records_owner_not_admin() {
        let (service, _, sink) = document_service();
        let owner = actor(UserRole::User);
        let doc = service.create(&owner, input("T", "C")).await.unwrap();

        service
            .remove(&actor(UserRole::Admin), doc.id)
            .await
            .unwrap();
        assert_eq!(sink.events()[1].user_id, owner.user_id);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_actor_even_for_admin() {
        let (service, _, _) = document_service();
        let u1 = actor(UserRole::User);
        let admin = actor(UserRole::Admin);

        let first = service.create(&u1, input("first", "C")).await.unwrap();
        let second = service.create(&u1, input("second", "C")).await.unwrap();
        let own = service.create(&admin, input("admin", "C")).await.unwrap();

        let listed: Vec<Uuid> = service
            .list_own(&u1)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(listed, vec![second.id, first.id]);

        let admin_listed = service.list_own(&admin).await.unwrap();
        assert_eq!(admin_listed.len(), 1);
        assert_eq!(admin_listed[0].id, own.id);
        assert!(admin_listed.iter().all(|d| d.user_id == admin.user_id));
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_fail_mutations() {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = DocumentService::new(store.clone(), Arc::new(FailingSink));
        let owner = actor(UserRole::User);

        let doc = service.create(&owner, input("T", "C")).await.unwrap();
        let updated = service
            .update(&owner, doc.id, title_patch("X"))
            .await
            .unwrap();
        assert_eq!(updated.title, "X");

        let removed = service.remove(&owner, doc.id).await.unwrap();
        assert_eq!(removed.id, doc.id);
        assert!(store.is_empty());
    }
}
