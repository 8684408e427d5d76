//! Route configuration and setup

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::state::AppState;

/// Build the application router
pub fn router(state: AppState, max_upload_bytes: Option<usize>) -> Router {
    let body_limit = match max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/api/upload", post(handlers::upload_file))
        .route("/api/compress", post(handlers::compress_file))
        .route("/api/download/{file_id}", get(handlers::download_file))
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::compression::CompressionServiceImpl;
    use crate::domains::core::LocalFileStorageService;
    use crate::domains::registry::InMemoryFileRegistry;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "----compressor-test-boundary";

    fn app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorageService::new(dir.path()).unwrap();
        let service = CompressionServiceImpl::new(
            Arc::new(InMemoryFileRegistry::new()),
            Arc::new(storage),
            "http://testserver",
        );
        (dir, router(AppState::new(Arc::new(service)), None))
    }

    fn multipart_request(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    fn compress_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/compress")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn download_request(file_id: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/api/download/{}", file_id))
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_compress_download_flow() {
        let (_dir, app) = app();
        let payload = b"plain bytes for an unknown type".to_vec();

        let response = app.clone().oneshot(multipart_request("file", "notes v1.xyz", &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let upload = json_body(response).await;
        assert_eq!(upload["filename"], "notes_v1.xyz");
        assert_eq!(upload["size"], payload.len() as u64);
        let file_id = upload["file_id"].as_str().unwrap().to_string();

        let response = app.clone().oneshot(download_request(&file_id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(compress_request(json!({ "file_id": file_id, "quality": 40 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats = json_body(response).await;
        assert_eq!(stats["original_size"], payload.len() as u64);
        assert_eq!(stats["compressed_size"], payload.len() as u64);
        assert_eq!(stats["reduction_percentage"], 0.0);
        assert_eq!(
            stats["download_url"],
            format!("http://testserver/api/download/{}", file_id)
        );

        let response = app.oneshot(download_request(&file_id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"notes_v1.xyz\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.to_vec(), payload);
    }

    #[tokio::test]
    async fn test_upload_without_file_part() {
        let (_dir, app) = app();

        let response = app.oneshot(multipart_request("attachment", "a.txt", b"abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Invalid input: No file part");
    }

    #[tokio::test]
    async fn test_upload_with_empty_filename() {
        let (_dir, app) = app();

        let response = app.oneshot(multipart_request("file", "", b"abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compress_unknown_file() {
        let (_dir, app) = app();

        let response = app
            .clone()
            .oneshot(compress_request(json!({ "file_id": uuid::Uuid::new_v4().to_string() })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(compress_request(json!({ "file_id": "not-a-uuid" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_compress_rejects_bad_json() {
        let (_dir, app) = app();

        let response = app.oneshot(compress_request(json!({ "quality": 50 }))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error_type"], "InvalidInput");
    }

    #[tokio::test]
    async fn test_compress_corrupt_pdf_is_server_error() {
        let (_dir, app) = app();

        let response = app.clone().oneshot(multipart_request("file", "scan.pdf", b"%PDF-garbage")).await.unwrap();
        let file_id = json_body(response).await["file_id"].as_str().unwrap().to_string();

        let response = app.oneshot(compress_request(json!({ "file_id": file_id }))).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error_type"], "CompressionFailed");
    }
}
