//! Route definitions for the docvault HTTP API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Headroom for multipart boundaries and the text fields next to the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the Axum router with all routes.
///
/// The upload route gets a body limit slightly above the configured file
/// size so the exact limit is enforced on the file itself.
pub fn build_router(state: AppState) -> Router {
    let max_upload =
        usize::try_from(state.upload_service.max_size_bytes()).unwrap_or(usize::MAX);
    let upload_limit = max_upload.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/graphql",
            get(handlers::graphql::graphiql).post(handlers::graphql::graphql),
        )
        .route(
            "/documents/upload",
            post(handlers::document::upload_document)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/documents/download/{id}",
            get(handlers::document::download_document),
        )
        .with_state(state)
}
