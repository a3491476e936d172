//! Conversion of domain errors into GraphQL error entries.

use async_graphql::{Context, ErrorExtensions};

use docvault_core::error::AppError;
use docvault_service::context::RequestContext;

use crate::error::public_message;

/// Maps an [`AppError`] into a GraphQL error with `extensions.code`.
pub fn map_app_error(err: AppError) -> async_graphql::Error {
    if !err.kind.is_client_error() {
        tracing::error!(kind = %err.kind, error = %err, "GraphQL resolver failed");
    }
    let code = err.kind.to_string();
    async_graphql::Error::new(public_message(&err)).extend_with(|_, ext| ext.set("code", code))
}

/// Returns the acting user or an `Unauthorized` error.
pub fn require_user<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a RequestContext> {
    ctx.data_opt::<RequestContext>()
        .ok_or_else(|| map_app_error(AppError::unauthorized("Unauthorized")))
}
