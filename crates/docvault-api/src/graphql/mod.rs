//! GraphQL schema for accounts and documents.
//!
//! The acting user is placed into request data by the HTTP handler as a
//! [`RequestContext`](docvault_service::context::RequestContext); resolvers
//! that need one fail with `Unauthorized` when it is absent.

pub mod error;
pub mod inputs;
pub mod mutation;
pub mod query;
pub mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use docvault_service::{AuthService, DocumentService};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// The executable schema type.
pub type DocvaultSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the services resolvers depend on.
pub fn build_schema(auth: Arc<AuthService>, documents: Arc<DocumentService>) -> DocvaultSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth)
        .data(documents)
        .finish()
}
