//! # docvault-api
//!
//! HTTP API layer for docvault built on Axum.
//!
//! Serves the GraphQL schema at `/graphql`, the multipart upload and file
//! download endpoints under `/documents`, and a plain `/health` check.
//! Bearer tokens are resolved into a `RequestContext` by the extractors
//! before any resolver or handler runs.

pub mod app;
pub mod error;
pub mod extractors;
pub mod graphql;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
