//! Bearer token extractors that resolve the acting user.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use docvault_core::error::AppError;
use docvault_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Returns the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authenticated user context; rejects the request with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        let ctx = state.auth_service.authenticate(token).await?;
        Ok(AuthUser(ctx))
    }
}

/// Optional user context for the GraphQL endpoint.
///
/// A missing or invalid token yields `None`; resolvers that need an actor
/// report `Unauthorized` themselves so public operations keep working.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(MaybeAuthUser(None));
        };

        match state.auth_service.authenticate(token).await {
            Ok(ctx) => Ok(MaybeAuthUser(Some(ctx))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid bearer token");
                Ok(MaybeAuthUser(None))
            }
        }
    }
}
