use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use duet_types::api::{Claims, CreatePhotoRequest, PhotoResponse};

use crate::auth::AppState;
use crate::parse;

#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

/// POST /photos — record a shared daily photo. The media blob must already
/// have been uploaded via POST /files.
pub async fn create_photo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePhotoRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let title = trimmed(req.title);
    let description = trimmed(req.description);

    let photo_id = Uuid::new_v4();

    let db = state.clone();
    let pid = photo_id.to_string();
    let aid = claims.sub.to_string();
    let fid = req.file_id.to_string();
    let (t, d) = (title.clone(), description.clone());
    let file_found = tokio::task::spawn_blocking(move || {
        let Some(_) = db.db.get_file(&fid)? else {
            return Ok(false);
        };
        db.db
            .insert_photo(&pid, &aid, t.as_deref(), d.as_deref(), &fid)?;
        Ok::<_, anyhow::Error>(true)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|e| {
        error!("DB insert_photo error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !file_found {
        return Err(StatusCode::NOT_FOUND);
    }

    let author_name = author_display_name(&state, &claims).await?;
    let now = Utc::now();

    Ok((
        StatusCode::CREATED,
        Json(PhotoResponse {
            id: photo_id,
            author_id: claims.sub,
            author_name,
            title,
            description,
            image_url: format!("/files/{}", req.file_id),
            taken_on: now.date_naive(),
            created_at: now,
        }),
    ))
}

/// GET /photos — the shared gallery, newest first.
pub async fn get_photos(
    State(state): State<AppState>,
    Query(query): Query<PhotoQuery>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let limit = query.limit.min(200);

    let rows = tokio::task::spawn_blocking(move || db.db.list_photos(limit))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB list_photos error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let photos: Vec<PhotoResponse> = rows
        .into_iter()
        .map(|row| PhotoResponse {
            id: parse::uuid(&row.id, "photo id"),
            author_id: parse::uuid(&row.author_id, "author_id"),
            author_name: row.author_name,
            title: row.title,
            description: row.description,
            image_url: format!("/files/{}", row.file_id),
            taken_on: parse::date(&row.taken_on, "taken_on"),
            created_at: parse::timestamp(&row.created_at, "created_at"),
        })
        .collect();

    Ok(Json(photos))
}

pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Look up the caller's display name for echoing back in a create response.
pub(crate) async fn author_display_name(
    state: &AppState,
    claims: &Claims,
) -> Result<String, StatusCode> {
    let db = state.clone();
    let uid = claims.sub.to_string();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_id(&uid))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB get_user_by_id error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(user
        .map(|u| u.display_name)
        .unwrap_or_else(|| claims.username.clone()))
}
