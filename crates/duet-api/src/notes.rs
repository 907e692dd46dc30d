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

use duet_types::api::{Claims, CreateNoteRequest, NoteResponse};

use crate::auth::AppState;
use crate::parse;
use crate::photos::{author_display_name, trimmed};

#[derive(Debug, Deserialize)]
pub struct NoteQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

/// POST /notes — share a daily note.
pub async fn create_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let content = req.content.trim().to_string();
    if content.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let title = trimmed(req.title);

    let note_id = Uuid::new_v4();

    let db = state.clone();
    let nid = note_id.to_string();
    let aid = claims.sub.to_string();
    let (t, c) = (title.clone(), content.clone());
    tokio::task::spawn_blocking(move || db.db.insert_note(&nid, &aid, t.as_deref(), &c))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB insert_note error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let author_name = author_display_name(&state, &claims).await?;

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse {
            id: note_id,
            author_id: claims.sub,
            author_name,
            title,
            content,
            created_at: Utc::now(),
        }),
    ))
}

/// GET /notes — newest first.
pub async fn get_notes(
    State(state): State<AppState>,
    Query(query): Query<NoteQuery>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let limit = query.limit.min(200);

    let rows = tokio::task::spawn_blocking(move || db.db.list_notes(limit))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB list_notes error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let notes: Vec<NoteResponse> = rows
        .into_iter()
        .map(|row| NoteResponse {
            id: parse::uuid(&row.id, "note id"),
            author_id: parse::uuid(&row.author_id, "author_id"),
            author_name: row.author_name,
            title: row.title,
            content: row.content,
            created_at: parse::timestamp(&row.created_at, "created_at"),
        })
        .collect();

    Ok(Json(notes))
}
