//! GraphQL endpoint handlers.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::extractors::MaybeAuthUser;
use crate::state::AppState;

/// POST /graphql
pub async fn graphql(
    State(state): State<AppState>,
    MaybeAuthUser(actor): MaybeAuthUser,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(actor) = actor {
        request = request.data(actor);
    }
    state.schema.execute(request).await.into()
}

/// GET /graphql
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
