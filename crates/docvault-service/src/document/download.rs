//! File downloads gated by the document core.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::traits::storage::{ByteStream, StorageProvider};
use docvault_storage::is_upload_key;

use crate::context::RequestContext;

use super::service::DocumentService;

/// An opened file ready to be streamed to the client.
pub struct FileDownload {
    /// Original file name, for `Content-Disposition`.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// File contents.
    pub stream: ByteStream,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Serves the file attached to a document.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// Document core, for the access gate.
    documents: Arc<DocumentService>,
    /// Storage provider.
    storage: Arc<dyn StorageProvider>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(documents: Arc<DocumentService>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { documents, storage }
    }

    /// Opens the document's file after the owner-or-admin gate.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<FileDownload, AppError> {
        let document = self.documents.get(ctx, document_id).await?;
        let file = document
            .file
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if !is_upload_key(self.documents.upload_dir(), &file.file_path) {
            warn!(
                user_id = %ctx.user_id,
                document_id = %document_id,
                file_path = %file.file_path,
                "Refusing to serve a file outside the upload directory"
            );
            return Err(AppError::not_found("File not found"));
        }

        let on_disk = |e: AppError| {
            if e.is(ErrorKind::NotFound) {
                AppError::not_found("File not found on disk")
            } else {
                e
            }
        };
        let size = self.storage.size(&file.file_path).await.map_err(on_disk)?;
        let stream = self.storage.read(&file.file_path).await.map_err(on_disk)?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            size,
            "File download started"
        );

        let mime_type = if file.mime_type.trim().is_empty() {
            "application/octet-stream".to_string()
        } else {
            file.mime_type
        };

        Ok(FileDownload {
            file_name: file.file_name,
            mime_type,
            size,
            stream,
        })
    }
}
