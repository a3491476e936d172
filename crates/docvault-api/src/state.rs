//! Application state shared across all handlers and resolvers.

use std::fmt;
use std::sync::Arc;

use docvault_core::config::AppConfig;
use docvault_core::traits::StorageProvider;
use docvault_database::store::{CredentialStore, DocumentStore};
use docvault_service::{AuditSink, AuthService, DocumentService, DownloadService, UploadService};

use crate::graphql::{DocvaultSchema, build_schema};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped (the schema is internally reference counted) so cloning
/// per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Registration, login and token resolution
    pub auth_service: Arc<AuthService>,
    /// Access-controlled document operations
    pub document_service: Arc<DocumentService>,
    /// Multipart upload into local storage
    pub upload_service: Arc<UploadService>,
    /// Attached file streaming
    pub download_service: Arc<DownloadService>,
    /// Executable GraphQL schema
    pub schema: DocvaultSchema,
}

impl AppState {
    /// Wires the service layer over the given stores and sinks.
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        documents: Arc<dyn DocumentStore>,
        audit: Arc<dyn AuditSink>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(credentials, &config.auth));
        let document_service = Arc::new(
            DocumentService::new(documents, audit).with_upload_dir(&config.storage.upload_dir),
        );
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&document_service),
            Arc::clone(&storage),
            &config.storage,
        ));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&document_service),
            storage,
        ));
        let schema = build_schema(Arc::clone(&auth_service), Arc::clone(&document_service));

        Self {
            config: Arc::new(config),
            auth_service,
            document_service,
            upload_service,
            download_service,
            schema,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("document_service", &self.document_service)
            .finish_non_exhaustive()
    }
}
