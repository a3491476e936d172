//! Query root.

use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result as GraphQLResult};

use docvault_service::{AuthService, DocumentService};

use super::error::{map_app_error, require_user};
use super::inputs::parse_id;
use super::types::{DocumentType, UserType};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The authenticated user.
    async fn me(&self, ctx: &Context<'_>) -> GraphQLResult<UserType> {
        let actor = require_user(ctx)?;
        let auth = ctx.data::<Arc<AuthService>>()?;
        let user = auth.me(actor).await.map_err(map_app_error)?;
        Ok(user.into())
    }

    /// Documents owned by the caller, newest first.
    async fn documents(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<DocumentType>> {
        list_own(ctx).await
    }

    /// Documents owned by the caller, newest first.
    async fn documents_by_user(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<DocumentType>> {
        list_own(ctx).await
    }

    /// A single document, if the caller owns it or is an admin.
    async fn document(&self, ctx: &Context<'_>, id: ID) -> GraphQLResult<DocumentType> {
        let actor = require_user(ctx)?;
        let documents = ctx.data::<Arc<DocumentService>>()?;
        let id = parse_id(&id).map_err(map_app_error)?;
        let doc = documents.get(actor, id).await.map_err(map_app_error)?;
        Ok(doc.into())
    }
}

async fn list_own(ctx: &Context<'_>) -> GraphQLResult<Vec<DocumentType>> {
    let actor = require_user(ctx)?;
    let documents = ctx.data::<Arc<DocumentService>>()?;
    let docs = documents.list_own(actor).await.map_err(map_app_error)?;
    Ok(docs.into_iter().map(DocumentType::from).collect())
}
