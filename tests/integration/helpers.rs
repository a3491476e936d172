//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use docvault_api::{AppState, build_app};
use docvault_core::config::AppConfig;
use docvault_database::memory::{MemoryCredentialStore, MemoryDocumentStore};
use docvault_service::LogAuditSink;
use docvault_storage::LocalStorageProvider;

const BOUNDARY: &str = "docvault-test-boundary";

/// Test application backed by in-memory stores and a temporary upload root.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Temporary storage root; removed when the app is dropped
    pub storage_root: TempDir,
}

/// Response with the body parsed as JSON when possible
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub bytes: Bytes,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the configuration
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let storage_root = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.root_path = storage_root.path().to_string_lossy().into_owned();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        adjust(&mut config);

        let storage = LocalStorageProvider::new(&config.storage.root_path)
            .await
            .expect("Failed to init storage");

        let state = AppState::new(
            config,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(LogAuditSink),
            Arc::new(storage),
        );

        Self {
            router: build_app(state),
            storage_root,
        }
    }

    /// Send a request through the router
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Plain GET with an optional bearer token
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        self.send(req.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// Execute a GraphQL document
    pub async fn graphql(&self, query: &str, variables: Value, token: Option<&str>) -> TestResponse {
        let body = json!({ "query": query, "variables": variables });
        let mut req = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        self.send(
            req.body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
    }

    /// Register an account and return its access token and user id
    pub async fn register(&self, email: &str) -> (String, String) {
        let response = self
            .graphql(
                "mutation Register($input: RegisterInput!) { register(registerInput: $input) { accessToken user { id } } }",
                json!({
                    "input": {
                        "email": email,
                        "password": "password123",
                        "firstName": "Test",
                        "lastName": "User",
                    }
                }),
                None,
            )
            .await;
        let payload = &response.body["data"]["register"];
        (
            payload["accessToken"]
                .as_str()
                .expect("register returned no token")
                .to_string(),
            payload["user"]["id"]
                .as_str()
                .expect("register returned no user")
                .to_string(),
        )
    }

    /// Upload a file through the multipart endpoint
    pub async fn upload(
        &self,
        token: Option<&str>,
        file: Option<(&str, &str, &[u8])>,
        title: Option<&str>,
    ) -> TestResponse {
        let mut body: Vec<u8> = Vec::new();
        if let Some(title) = title {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, mime, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: {mime}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri("/documents/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }
}
