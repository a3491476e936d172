//! Health check handler.

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}
