use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::compression::{CompressionConfig, CompressionResult, UploadResult};
use crate::errors::DomainError;
use super::error::ApiError;
use super::state::AppState;

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct CompressRequest {
    pub file_id: String,
    pub quality: Option<i32>,
}

/// Unknown and malformed ids are both reported as not found
fn parse_file_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError(DomainError::NotFound(raw.to_string())))
}

/// `POST /api/upload`
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResult>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(DomainError::InvalidInput("No selected file".to_string()).into());
        }

        let data = field.bytes().await?;
        let upload = state.compression_service.upload_file(data.to_vec(), &filename).await?;
        return Ok(Json(upload));
    }

    Err(DomainError::InvalidInput("No file part".to_string()).into())
}

/// `POST /api/compress`
pub async fn compress_file(
    State(state): State<AppState>,
    payload: Result<Json<CompressRequest>, JsonRejection>,
) -> Result<Json<CompressionResult>, ApiError> {
    let Json(request) = payload?;
    let file_id = parse_file_id(&request.file_id)?;

    let result = state
        .compression_service
        .compress_file(file_id, Some(CompressionConfig::with_quality(request.quality)))
        .await?;

    Ok(Json(result))
}

/// `GET /api/download/{file_id}`
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let file_id = parse_file_id(&file_id)?;
    let file = state.compression_service.download_file(file_id).await?;

    let content_disposition = format!("attachment; filename=\"{}\"", file.filename);
    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (header::CONTENT_DISPOSITION, content_disposition),
    ];

    Ok((headers, file.data))
}
