//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

/// Metadata of a file attached to a document.
///
/// The four columns are stored nullable and are either all set or all
/// null, so a document carries `Option<FileAttachment>` rather than four
/// independent options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    /// Original client-side file name.
    pub file_name: String,
    /// Storage key of the stored bytes (e.g. `uploads/<uuid>.pdf`).
    pub file_path: String,
    /// Size in bytes.
    pub file_size: i64,
    /// MIME type reported at upload.
    pub mime_type: String,
}

/// A text document, optionally backed by an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Non-empty title.
    pub title: String,
    /// Body text. May be empty when a file is attached.
    pub content: String,
    /// Attached file metadata, if any.
    #[serde(flatten)]
    pub file: Option<FileAttachment>,
    /// Owner. Immutable after creation.
    pub user_id: Uuid,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Check if `user_id` owns this document.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

impl<'r> FromRow<'r, PgRow> for Document {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let file_name: Option<String> = row.try_get("file_name")?;
        let file_path: Option<String> = row.try_get("file_path")?;
        let file_size: Option<i64> = row.try_get("file_size")?;
        let mime_type: Option<String> = row.try_get("mime_type")?;

        let file = match (file_name, file_path, file_size, mime_type) {
            (Some(file_name), Some(file_path), Some(file_size), Some(mime_type)) => {
                Some(FileAttachment {
                    file_name,
                    file_path,
                    file_size,
                    mime_type,
                })
            }
            (None, None, None, None) => None,
            _ => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "file_name".to_string(),
                    source: "file metadata columns must be all set or all null".into(),
                });
            }
        };

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            file,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Data required to insert a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Attached file metadata.
    pub file: Option<FileAttachment>,
    /// Owner.
    pub user_id: Uuid,
}

/// A partial update. Absent fields are left untouched.
///
/// Serializes to exactly the fields that were submitted, which is what
/// the `UPDATE` audit event records as `changes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl DocumentPatch {
    /// Check if the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Apply the patch to a document in place.
    pub fn apply_to(&self, document: &mut Document) {
        if let Some(title) = &self.title {
            document.title = title.clone();
        }
        if let Some(content) = &self.content {
            document.content = content.clone();
        }
    }
}
