//! # docvault-service
//!
//! Business logic service layer for docvault. [`DocumentService`] is the
//! access-control and audit core: every document read or mutation goes
//! through its owner-or-admin gate, and every mutation is followed by a
//! best-effort [`AuditSink`] publish.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod context;
pub mod document;
pub mod user;
mod validation;

#[cfg(test)]
mod test_support;

pub use audit::{AuditSink, LogAuditSink};
pub use context::RequestContext;
pub use document::{
    CreateDocumentInput, DocumentService, DownloadService, FileDownload, StoredFileInfo,
    UploadOutcome, UploadRequest, UploadService,
};
pub use user::{AuthPayload, AuthService, LoginInput, RegisterInput};
