use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use tokio::io::AsyncWriteExt;
use tracing::error;
use uuid::Uuid;

use duet_types::api::{Claims, UploadResponse};

use crate::auth::AppState;

/// 10 MB upload limit for media files
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// POST /files — accepts a raw media blob, saves it under the upload
/// directory, inserts a DB row, returns { file_id, size, url }.
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Result<impl IntoResponse, StatusCode> {
    if bytes.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    if bytes.len() > MAX_FILE_SIZE {
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let file_id = Uuid::new_v4();
    let size = bytes.len() as i64;

    // Write blob to disk
    let file_path = state.upload_dir.join(file_id.to_string());
    let mut file = tokio::fs::File::create(&file_path).await.map_err(|e| {
        error!("Failed to create file {}: {}", file_path.display(), e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    file.write_all(&bytes).await.map_err(|e| {
        error!("Failed to write file {}: {}", file_path.display(), e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    // Insert DB record
    let db = state.clone();
    let fid = file_id.to_string();
    let uid = claims.sub.to_string();
    tokio::task::spawn_blocking(move || db.db.insert_file(&fid, &uid, &content_type, size))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB insert_file error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            file_id,
            size: size as u64,
            url: format!("/files/{}", file_id),
        }),
    ))
}

/// GET /files/{file_id} — reads the blob back with its stored content type.
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    // Validate file_id is a valid UUID to prevent path traversal
    file_id
        .parse::<Uuid>()
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    // Verify file exists in DB
    let db = state.clone();
    let fid = file_id.clone();
    let file_row = tokio::task::spawn_blocking(move || db.db.get_file(&fid))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB get_file error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    // Read from disk
    let file_path = state.upload_dir.join(&file_id);
    let bytes = tokio::fs::read(&file_path).await.map_err(|e| {
        error!("Failed to read file {}: {}", file_path.display(), e);
        StatusCode::NOT_FOUND
    })?;

    Ok(([(header::CONTENT_TYPE, file_row.content_type)], bytes))
}
