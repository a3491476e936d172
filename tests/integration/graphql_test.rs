//! GraphQL endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.bytes[..], b"OK");
}

#[tokio::test]
async fn test_unauthenticated_call_returns_graphql_error() {
    let app = TestApp::new().await;

    let response = app.graphql("{ documentsByUser { id } }", json!({}), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["errors"][0]["message"], "Unauthorized");
    assert_eq!(response.body["errors"][0]["extensions"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let app = TestApp::new().await;

    let response = app
        .graphql("{ me { id } }", json!({}), Some("not-a-real-token"))
        .await;

    assert_eq!(response.body["errors"][0]["message"], "Unauthorized");
}

#[tokio::test]
async fn test_me_returns_registered_user() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("me@example.com").await;

    let response = app
        .graphql("{ me { id email role } }", json!({}), Some(&token))
        .await;

    assert_eq!(response.body["data"]["me"]["id"], user_id);
    assert_eq!(response.body["data"]["me"]["email"], "me@example.com");
    assert_eq!(response.body["data"]["me"]["role"], "USER");
}

#[tokio::test]
async fn test_document_lifecycle_over_http() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("crud@example.com").await;

    let created = app
        .graphql(
            "mutation Create($input: CreateDocumentInput!) { createDocument(createDocumentInput: $input) { id title userId } }",
            json!({ "input": { "title": "Plan", "content": "Step one" } }),
            Some(&token),
        )
        .await;
    let doc = &created.body["data"]["createDocument"];
    assert_eq!(doc["userId"], user_id);
    let id = doc["id"].as_str().unwrap().to_string();

    let updated = app
        .graphql(
            "mutation Update($input: UpdateDocumentInput!) { updateDocument(updateDocumentInput: $input) { title content } }",
            json!({ "input": { "id": id, "content": "Step two" } }),
            Some(&token),
        )
        .await;
    assert_eq!(updated.body["data"]["updateDocument"]["title"], "Plan");
    assert_eq!(updated.body["data"]["updateDocument"]["content"], "Step two");

    let listed = app
        .graphql("{ documentsByUser { id } }", json!({}), Some(&token))
        .await;
    assert_eq!(listed.body["data"]["documentsByUser"][0]["id"], id);

    let removed = app
        .graphql(
            "mutation Remove($id: ID!) { removeDocument(id: $id) { id title } }",
            json!({ "id": id }),
            Some(&token),
        )
        .await;
    assert_eq!(removed.body["data"]["removeDocument"]["title"], "Plan");

    let listed = app
        .graphql("{ documents { id } }", json!({}), Some(&token))
        .await;
    assert!(listed.body["data"]["documents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_other_users_document_is_forbidden() {
    let app = TestApp::new().await;
    let (owner, _) = app.register("owner@example.com").await;
    let (intruder, _) = app.register("intruder@example.com").await;

    let created = app
        .graphql(
            "mutation { createDocument(createDocumentInput: { title: \"Mine\", content: \"x\" }) { id } }",
            json!({}),
            Some(&owner),
        )
        .await;
    let id = created.body["data"]["createDocument"]["id"].as_str().unwrap().to_string();

    for query in [
        "query Get($id: ID!) { document(id: $id) { id } }",
        "mutation Remove($id: ID!) { removeDocument(id: $id) { id } }",
    ] {
        let response = app.graphql(query, json!({ "id": id }), Some(&intruder)).await;
        assert_eq!(response.body["errors"][0]["extensions"]["code"], "FORBIDDEN");
    }

    let still_there = app
        .graphql(
            "query Get($id: ID!) { document(id: $id) { title } }",
            json!({ "id": id }),
            Some(&owner),
        )
        .await;
    assert_eq!(still_there.body["data"]["document"]["title"], "Mine");
}

#[tokio::test]
async fn test_graphiql_is_served_on_get() {
    let app = TestApp::new().await;

    let response = app.get("/graphql", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&response.bytes).contains("graphiql"));
}
