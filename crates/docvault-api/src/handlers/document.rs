//! File upload and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::json;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_service::UploadRequest;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /documents/upload
///
/// Multipart fields: `file` (required), `title` and `content` (optional).
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut file: Option<(String, Option<String>, bytes::Bytes)> = None;
    let mut title: Option<String> = None;
    let mut content: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or("").to_string();
                let mime_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((original_name, mime_type, data));
            }
            "title" => title = Some(field.text().await.map_err(multipart_error)?),
            "content" => content = Some(field.text().await.map_err(multipart_error)?),
            _ => {
                tracing::debug!(field = %name, "Ignoring unknown multipart field");
            }
        }
    }

    let (original_name, mime_type, data) =
        file.ok_or_else(|| AppError::validation("No file uploaded"))?;

    let outcome = state
        .upload_service
        .upload(
            &auth,
            UploadRequest {
                original_name,
                mime_type,
                data,
                title: title.filter(|t| !t.trim().is_empty()),
                content: content.filter(|c| !c.is_empty()),
            },
        )
        .await?;

    let body = json!({
        "message": "File uploaded successfully",
        "document": outcome.document,
        "file": outcome.file,
    });

    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// GET /documents/download/{id}
pub async fn download_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let download = state.download_service.download(&auth, id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type(&download.mime_type))
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&download.file_name),
        )
        .header(header::CONTENT_LENGTH, download.size)
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Characters left unescaped in the RFC 5987 `filename*` parameter.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'-').remove(b'_');

/// `attachment` disposition with an ASCII `filename` fallback and the exact
/// name as UTF-8 in `filename*`.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, FILENAME_ENCODE_SET);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

/// Stored MIME type, or `application/octet-stream` when it is not a valid
/// header value.
fn content_type(mime_type: &str) -> HeaderValue {
    HeaderValue::from_str(mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("File too large")
    } else {
        AppError::validation(format!("Multipart error: {}", e.body_text()))
    }
}
