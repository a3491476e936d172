//! Document repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::document::{CreateDocument, Document, DocumentPatch};

use crate::store::DocumentStore;

/// Postgres-backed [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let file = data.file.as_ref();
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents \
             (title, content, file_name, file_path, file_size, mime_type, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(file.map(|f| f.file_name.as_str()))
        .bind(file.map(|f| f.file_path.as_str()))
        .bind(file.map(|f| f.file_size))
        .bind(file.map(|f| f.mime_type.as_str()))
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("User with ID {} not found", data.user_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create document", e),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find document by id", e)
            })
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    async fn update(&self, id: Uuid, patch: &DocumentPatch) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET \
             title = COALESCE($2, title), \
             content = COALESCE($3, content), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.content.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("DELETE FROM documents WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete document", e))
    }
}
