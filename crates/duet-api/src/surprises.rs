use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use duet_core::{MediaKind, SurpriseItem, SurpriseView, gate};
use duet_types::api::{Claims, CreateSurpriseRequest, SurpriseResponse};

use crate::auth::AppState;
use crate::parse;
use crate::photos::{author_display_name, trimmed};

#[derive(Debug, Deserialize)]
pub struct SurpriseQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

/// POST /surprises — store a time-locked surprise. The unlock date defaults
/// to the configured reunion date. The response is already gated, so a
/// surprise created for a future date comes back locked even to its author.
pub async fn create_surprise(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateSurpriseRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let content = trimmed(req.content);
    match req.media_kind {
        // A text surprise is its message; there is nothing to attach.
        MediaKind::Text => {
            if content.is_none() || req.file_id.is_some() {
                return Err(StatusCode::BAD_REQUEST);
            }
        }
        MediaKind::Image | MediaKind::Video | MediaKind::Audio => {
            if req.file_id.is_none() {
                return Err(StatusCode::BAD_REQUEST);
            }
        }
    }

    let unlock_date = req.unlock_date.unwrap_or_else(|| state.reunion_date());
    let surprise_id = Uuid::new_v4();

    let db = state.clone();
    let sid = surprise_id.to_string();
    let aid = claims.sub.to_string();
    let fid = req.file_id.map(|id| id.to_string());
    let (t, c) = (title.clone(), content.clone());
    let kind = req.media_kind;
    let unlock = unlock_date.to_string();
    let file_found = tokio::task::spawn_blocking(move || {
        if let Some(ref fid) = fid {
            if db.db.get_file(fid)?.is_none() {
                return Ok(false);
            }
        }
        db.db.insert_surprise(
            &sid,
            &aid,
            &t,
            c.as_deref(),
            fid.as_deref(),
            kind.as_str(),
            &unlock,
        )?;
        Ok::<_, anyhow::Error>(true)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|e| {
        error!("DB insert_surprise error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !file_found {
        return Err(StatusCode::NOT_FOUND);
    }

    let author_name = author_display_name(&state, &claims).await?;
    let now = Utc::now();

    let item = SurpriseItem {
        title,
        content,
        media_url: req.file_id.map(|id| format!("/files/{}", id)),
        media_kind: req.media_kind,
        unlock_date,
        unlocked: false,
    };
    let view = gate(&item, now.date_naive());

    Ok((
        StatusCode::CREATED,
        Json(to_response(
            surprise_id,
            claims.sub,
            author_name,
            now,
            &item,
            view,
        )),
    ))
}

/// GET /surprises — newest first, every item passed through the unlock
/// gate. Locked payloads never reach the serializer.
pub async fn get_surprises(
    State(state): State<AppState>,
    Query(query): Query<SurpriseQuery>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let limit = query.limit.min(200);

    let rows = tokio::task::spawn_blocking(move || db.db.list_surprises(limit))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB list_surprises error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let today = Utc::now().date_naive();

    let surprises: Vec<SurpriseResponse> = rows
        .into_iter()
        .map(|row| {
            let media_kind = MediaKind::parse(&row.media_kind).unwrap_or_else(|| {
                warn!("Corrupt media_kind '{}' on surprise '{}'", row.media_kind, row.id);
                MediaKind::Text
            });
            // An unreadable unlock date must not unlock the payload.
            let unlock_date: NaiveDate = row.unlock_date.parse().unwrap_or_else(|e| {
                warn!("Corrupt unlock_date '{}' on surprise '{}': {}", row.unlock_date, row.id, e);
                NaiveDate::MAX
            });

            let item = SurpriseItem {
                title: row.title,
                content: row.content,
                media_url: row.file_id.map(|id| format!("/files/{}", id)),
                media_kind,
                unlock_date,
                unlocked: row.unlocked,
            };
            let view = gate(&item, today);

            to_response(
                parse::uuid(&row.id, "surprise id"),
                parse::uuid(&row.author_id, "author_id"),
                row.author_name,
                parse::timestamp(&row.created_at, "created_at"),
                &item,
                view,
            )
        })
        .collect();

    Ok(Json(surprises))
}

fn to_response(
    id: Uuid,
    author_id: Uuid,
    author_name: String,
    created_at: DateTime<Utc>,
    item: &SurpriseItem,
    view: SurpriseView,
) -> SurpriseResponse {
    let (unlocked, days_remaining, content, media_url) = match view {
        SurpriseView::Unlocked { content, media_url } => (true, None, content, media_url),
        SurpriseView::Locked { days_remaining } => (false, Some(days_remaining), None, None),
    };

    SurpriseResponse {
        id,
        title: item.title.clone(),
        author_id,
        author_name,
        media_kind: item.media_kind,
        unlock_date: item.unlock_date,
        created_at,
        unlocked,
        days_remaining,
        content,
        media_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_response_has_no_payload_fields() {
        let item = SurpriseItem {
            title: "sealed".into(),
            content: Some("secret".into()),
            media_url: Some("/files/x".into()),
            media_kind: MediaKind::Image,
            unlock_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            unlocked: false,
        };
        let view = gate(&item, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let resp = to_response(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "David".into(),
            Utc::now(),
            &item,
            view,
        );

        assert!(!resp.unlocked);
        assert!(resp.content.is_none());
        assert!(resp.media_url.is_none());
        assert_eq!(resp.days_remaining, Some(1826));

        // And the serialized form omits the keys entirely.
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("content").is_none());
        assert!(json.get("media_url").is_none());
    }

    #[test]
    fn unlocked_response_exposes_payload_and_drops_days_remaining() {
        let item = SurpriseItem {
            title: "opened".into(),
            content: Some("secret".into()),
            media_url: None,
            media_kind: MediaKind::Text,
            unlock_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            unlocked: false,
        };
        let view = gate(&item, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

        let resp = to_response(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Shalom".into(),
            Utc::now(),
            &item,
            view,
        );

        assert!(resp.unlocked);
        assert_eq!(resp.content.as_deref(), Some("secret"));
        assert!(resp.days_remaining.is_none());
    }
}
