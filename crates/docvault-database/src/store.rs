//! Store traits the service layer is written against.
//!
//! Services receive these as `Arc<dyn ...>` so the Postgres repositories
//! can be swapped for the in-memory stores in tests.

use async_trait::async_trait;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::document::{CreateDocument, Document, DocumentPatch};
use docvault_entity::user::{CreateUser, User};

/// Persistence for user accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}

/// Persistence for documents.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a document and return the stored row.
    async fn create(&self, data: &CreateDocument) -> AppResult<Document>;

    /// Find a document by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>>;

    /// All documents owned by `user_id`, newest first.
    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Document>>;

    /// Apply a patch and return the updated row, or `None` if the row is gone.
    async fn update(&self, id: Uuid, patch: &DocumentPatch) -> AppResult<Option<Document>>;

    /// Delete a document and return the row as it was, or `None` if absent.
    async fn delete(&self, id: Uuid) -> AppResult<Option<Document>>;
}
