//! Raw row shapes as stored in SQLite. Timestamps stay TEXT here; the API
//! layer parses them when building responses.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct FileRow {
    pub id: String,
    pub owner_id: String,
    pub content_type: String,
    pub size: i64,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct PhotoRow {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_id: String,
    pub taken_on: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NoteRow {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct SurpriseRow {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub title: String,
    pub content: Option<String>,
    pub file_id: Option<String>,
    pub media_kind: String,
    pub unlock_date: String,
    pub unlocked: bool,
    pub created_at: String,
}
