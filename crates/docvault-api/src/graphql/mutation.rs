//! Mutation root.

use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result as GraphQLResult};

use docvault_service::{AuthService, CreateDocumentInput, DocumentService};

use super::error::{map_app_error, require_user};
use super::inputs::{
    CreateDocumentInputType, LoginInputType, RegisterInputType, UpdateDocumentInputType, parse_id,
};
use super::types::{AuthResponseType, DocumentType};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates an account with the `USER` role and signs it in.
    async fn register(
        &self,
        ctx: &Context<'_>,
        register_input: RegisterInputType,
    ) -> GraphQLResult<AuthResponseType> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let payload = auth
            .register(register_input.into())
            .await
            .map_err(map_app_error)?;
        Ok(payload.into())
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        login_input: LoginInputType,
    ) -> GraphQLResult<AuthResponseType> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let payload = auth
            .login(login_input.into())
            .await
            .map_err(map_app_error)?;
        Ok(payload.into())
    }

    /// Creates a document owned by the caller.
    async fn create_document(
        &self,
        ctx: &Context<'_>,
        create_document_input: CreateDocumentInputType,
    ) -> GraphQLResult<DocumentType> {
        let actor = require_user(ctx)?;
        let documents = ctx.data::<Arc<DocumentService>>()?;
        let input = CreateDocumentInput::try_from(create_document_input).map_err(map_app_error)?;
        let doc = documents.create(actor, input).await.map_err(map_app_error)?;
        Ok(doc.into())
    }

    async fn update_document(
        &self,
        ctx: &Context<'_>,
        update_document_input: UpdateDocumentInputType,
    ) -> GraphQLResult<DocumentType> {
        let actor = require_user(ctx)?;
        let documents = ctx.data::<Arc<DocumentService>>()?;
        let (id, patch) = update_document_input
            .into_parts()
            .map_err(map_app_error)?;
        let doc = documents
            .update(actor, id, patch)
            .await
            .map_err(map_app_error)?;
        Ok(doc.into())
    }

    /// Deletes a document and returns the removed record.
    async fn remove_document(&self, ctx: &Context<'_>, id: ID) -> GraphQLResult<DocumentType> {
        let actor = require_user(ctx)?;
        let documents = ctx.data::<Arc<DocumentService>>()?;
        let id = parse_id(&id).map_err(map_app_error)?;
        let doc = documents.remove(actor, id).await.map_err(map_app_error)?;
        Ok(doc.into())
    }
}
