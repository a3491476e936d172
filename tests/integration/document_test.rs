//! Upload and download endpoint tests.

use axum::http::{StatusCode, header};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_creates_document_with_defaults() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("upload@example.com").await;

    let response = app
        .upload(Some(&token), Some(("notes.txt", "text/plain", b"hello world")), None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "File uploaded successfully");
    assert_eq!(response.body["document"]["title"], "notes.txt");
    assert_eq!(response.body["document"]["content"], "Uploaded file");
    assert_eq!(response.body["document"]["userId"], user_id);
    assert_eq!(response.body["document"]["fileSize"], 11);
    assert_eq!(response.body["file"]["originalName"], "notes.txt");
    assert_eq!(response.body["file"]["mimetype"], "text/plain");
    assert!(
        response.body["file"]["filename"]
            .as_str()
            .unwrap()
            .ends_with(".txt")
    );

    let file_path = response.body["document"]["filePath"].as_str().unwrap();
    assert!(app.storage_root.path().join(file_path).exists());
}

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let app = TestApp::new().await;
    let (token, _) = app.register("download@example.com").await;

    let uploaded = app
        .upload(
            Some(&token),
            Some(("report.pdf", "application/pdf", b"%PDF-1.7 fake")),
            Some("Quarterly report"),
        )
        .await;
    assert_eq!(uploaded.body["document"]["title"], "Quarterly report");
    let id = uploaded.body["document"]["id"].as_str().unwrap();

    let response = app
        .get(&format!("/documents/download/{id}"), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.bytes[..], b"%PDF-1.7 fake");
    assert_eq!(response.headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(response.headers[header::CONTENT_LENGTH], "13");
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report.pdf\"; filename*=UTF-8''report.pdf"
    );
}

#[tokio::test]
async fn test_upload_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .upload(None, Some(("a.txt", "text/plain", b"a")), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let app = TestApp::new().await;
    let (token, _) = app.register("nofile@example.com").await;

    let response = app.upload(Some(&token), None, Some("Only a title")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No file uploaded");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = TestApp::with_config(|c| c.storage.max_upload_size_bytes = 16).await;
    let (token, _) = app.register("big@example.com").await;

    let response = app
        .upload(
            Some(&token),
            Some(("big.bin", "application/octet-stream", &[7u8; 64])),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);

    let listed = app
        .graphql("{ documentsByUser { id } }", json!({}), Some(&token))
        .await;
    assert!(listed.body["data"]["documentsByUser"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_download_of_foreign_document_is_forbidden() {
    let app = TestApp::new().await;
    let (owner, _) = app.register("file-owner@example.com").await;
    let (other, _) = app.register("file-other@example.com").await;

    let uploaded = app
        .upload(Some(&owner), Some(("secret.txt", "text/plain", b"shh")), None)
        .await;
    let id = uploaded.body["document"]["id"].as_str().unwrap();

    let response = app
        .get(&format!("/documents/download/{id}"), Some(&other))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_download_without_attachment_is_not_found() {
    let app = TestApp::new().await;
    let (token, _) = app.register("textonly@example.com").await;

    let created = app
        .graphql(
            "mutation { createDocument(createDocumentInput: { title: \"Text\", content: \"only\" }) { id } }",
            json!({}),
            Some(&token),
        )
        .await;
    let id = created.body["data"]["createDocument"]["id"].as_str().unwrap();

    let response = app
        .get(&format!("/documents/download/{id}"), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "File not found");
}

#[tokio::test]
async fn test_download_of_file_missing_on_disk_is_not_found() {
    let app = TestApp::new().await;
    let (token, _) = app.register("vanished@example.com").await;

    let uploaded = app
        .upload(Some(&token), Some(("gone.txt", "text/plain", b"bye")), None)
        .await;
    let id = uploaded.body["document"]["id"].as_str().unwrap();
    let file_path = uploaded.body["document"]["filePath"].as_str().unwrap();
    std::fs::remove_file(app.storage_root.path().join(file_path)).unwrap();

    let response = app
        .get(&format!("/documents/download/{id}"), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "File not found on disk");
}

#[tokio::test]
async fn test_create_with_path_outside_uploads_is_rejected() {
    let app = TestApp::new().await;
    let (token, _) = app.register("crafted@example.com").await;

    let config_dir = app.storage_root.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("secrets.toml"), "jwt_secret = \"hidden\"").unwrap();

    let created = app
        .graphql(
            "mutation Create($input: CreateDocumentInput!) { createDocument(createDocumentInput: $input) { id } }",
            json!({ "input": {
                "title": "Secrets",
                "content": "x",
                "fileName": "secrets.toml",
                "filePath": "config/secrets.toml",
                "fileSize": 21,
                "mimeType": "text/plain"
            } }),
            Some(&token),
        )
        .await;

    assert!(created.body["data"].is_null());
    let error = &created.body["errors"][0];
    assert_eq!(error["message"], "filePath must reference an uploaded file");
    assert_eq!(error["extensions"]["code"], "VALIDATION_ERROR");

    let listed = app
        .graphql("query { documents { id } }", json!({}), Some(&token))
        .await;
    assert_eq!(listed.body["data"]["documents"], json!([]));
}

#[tokio::test]
async fn test_download_of_non_ascii_name_uses_encoded_filename() {
    let app = TestApp::new().await;
    let (token, _) = app.register("unicode@example.com").await;

    let uploaded = app
        .upload(Some(&token), Some(("résumé.txt", "text/plain", b"cv")), None)
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED);
    let id = uploaded.body["document"]["id"].as_str().unwrap();

    let response = app
        .get(&format!("/documents/download/{id}"), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"r_sum_.txt\"; filename*=UTF-8''r%C3%A9sum%C3%A9.txt"
    );
}
