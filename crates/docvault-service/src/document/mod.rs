//! Document services: the access-control core, uploads and downloads.

pub mod download;
pub mod service;
pub mod upload;

pub use download::{DownloadService, FileDownload};
pub use service::{CreateDocumentInput, DocumentService};
pub use upload::{StoredFileInfo, UploadOutcome, UploadRequest, UploadService};
