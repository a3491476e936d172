//! File uploads: store bytes on disk, then create the backing document.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use docvault_core::config::StorageConfig;
use docvault_core::error::AppError;
use docvault_core::traits::storage::StorageProvider;
use docvault_entity::document::{Document, FileAttachment};
use docvault_storage::upload_key;

use crate::context::RequestContext;

use super::service::{CreateDocumentInput, DocumentService};

/// Content used when an upload does not provide one.
const DEFAULT_UPLOAD_CONTENT: &str = "Uploaded file";

/// A file received from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client-side file name.
    pub original_name: String,
    /// MIME type reported by the client.
    pub mime_type: Option<String>,
    /// File bytes.
    pub data: Bytes,
    /// Document title. Defaults to the original file name.
    pub title: Option<String>,
    /// Document content. Defaults to "Uploaded file".
    pub content: Option<String>,
}

/// Summary of the stored file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileInfo {
    /// Client-side file name.
    pub original_name: String,
    /// Randomized on-disk file name.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    pub mimetype: String,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// The created document.
    pub document: Document,
    /// Stored file summary.
    pub file: StoredFileInfo,
}

/// Handles file uploads into the local uploads directory.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Document core used to create the backing document.
    documents: Arc<DocumentService>,
    /// Storage provider.
    storage: Arc<dyn StorageProvider>,
    /// Directory (storage key prefix) receiving uploads.
    upload_dir: String,
    /// Maximum accepted size in bytes.
    max_size_bytes: u64,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        documents: Arc<DocumentService>,
        storage: Arc<dyn StorageProvider>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            documents,
            storage,
            upload_dir: config.upload_dir.clone(),
            max_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Stores the file and creates a document owned by the actor.
    ///
    /// The written file is removed again if the document cannot be created.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadRequest,
    ) -> Result<UploadOutcome, AppError> {
        let original_name = req.original_name.trim().to_string();
        if original_name.is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }
        let size = req.data.len() as u64;
        if size > self.max_size_bytes {
            return Err(AppError::payload_too_large(format!(
                "File exceeds the maximum upload size of {} bytes",
                self.max_size_bytes
            )));
        }

        let mime_type = req
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let title = req
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| original_name.clone());
        let content = req
            .content
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_CONTENT.to_string());

        let key = upload_key(&self.upload_dir, &original_name);
        self.storage.write(&key, req.data).await?;

        let input = CreateDocumentInput {
            title,
            content,
            file: Some(FileAttachment {
                file_name: original_name.clone(),
                file_path: key.clone(),
                file_size: size as i64,
                mime_type: mime_type.clone(),
            }),
            user_id: None,
        };

        let document = match self.documents.create(ctx, input).await {
            Ok(document) => document,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    warn!(path = %key, error = %cleanup, "Failed to remove orphaned upload");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            path = %key,
            size,
            "File uploaded"
        );

        let filename = key.rsplit('/').next().unwrap_or(&key).to_string();
        Ok(UploadOutcome {
            document,
            file: StoredFileInfo {
                original_name,
                filename,
                size,
                mimetype: mime_type,
            },
        })
    }
}
