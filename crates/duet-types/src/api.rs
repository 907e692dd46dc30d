use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use duet_core::{MediaKind, TimeRemaining};

// -- JWT Claims --

/// JWT claims shared between token minting (auth handlers) and validation
/// (middleware). Canonical definition lives here in duet-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub token: String,
}

// -- Countdown --

#[derive(Debug, Serialize)]
pub struct CountdownResponse {
    pub target: DateTime<Utc>,
    pub remaining: TimeRemaining,
    pub complete: bool,
}

/// Static instance details, rendered on the login screen.
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub app_title: String,
    pub partner1: String,
    pub partner2: String,
    pub relationship_start: NaiveDate,
}

// -- Photos --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePhotoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub taken_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// -- Notes --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// -- Surprises --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSurpriseRequest {
    pub title: String,
    pub content: Option<String>,
    pub media_kind: MediaKind,
    pub file_id: Option<Uuid>,
    /// Defaults to the configured reunion date when omitted.
    pub unlock_date: Option<NaiveDate>,
}

/// A gated surprise. Locked items serialize without `content` and
/// `media_url` keys entirely; `days_remaining` is present only while locked.
#[derive(Debug, Serialize)]
pub struct SurpriseResponse {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub media_kind: MediaKind,
    pub unlock_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

// -- Files --

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: Uuid,
    pub size: u64,
    pub url: String,
}
