use crate::Database;
use crate::models::{FileRow, NoteRow, PhotoRow, SurpriseRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        username: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, display_name, password) VALUES (?1, ?2, ?3, ?4)",
                (id, username, display_name, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            query_user(
                conn,
                "SELECT id, username, display_name, password, created_at
                 FROM users WHERE username = ?1",
                username,
            )
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            query_user(
                conn,
                "SELECT id, username, display_name, password, created_at
                 FROM users WHERE id = ?1",
                id,
            )
        })
    }

    // -- Files --

    pub fn insert_file(&self, id: &str, owner_id: &str, content_type: &str, size: i64) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO files (id, owner_id, content_type, size) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, owner_id, content_type, size],
            )?;
            Ok(())
        })
    }

    pub fn get_file(&self, id: &str) -> Result<Option<FileRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, content_type, size, created_at FROM files WHERE id = ?1",
            )?;
            let row = stmt
                .query_row([id], |row| {
                    Ok(FileRow {
                        id: row.get(0)?,
                        owner_id: row.get(1)?,
                        content_type: row.get(2)?,
                        size: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    // -- Photos --

    pub fn insert_photo(
        &self,
        id: &str,
        author_id: &str,
        title: Option<&str>,
        description: Option<&str>,
        file_id: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO photos (id, author_id, title, description, file_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, author_id, title, description, file_id],
            )?;
            Ok(())
        })
    }

    pub fn list_photos(&self, limit: u32) -> Result<Vec<PhotoRow>> {
        self.with_conn(|conn| {
            // JOIN users for the author name in a single query (no N+1)
            let mut stmt = conn.prepare(
                "SELECT p.id, p.author_id, u.display_name, p.title, p.description,
                        p.file_id, p.taken_on, p.created_at
                 FROM photos p
                 LEFT JOIN users u ON p.author_id = u.id
                 ORDER BY p.created_at DESC, p.rowid DESC
                 LIMIT ?1",
            )?;

            let rows = stmt
                .query_map([limit], |row| {
                    Ok(PhotoRow {
                        id: row.get(0)?,
                        author_id: row.get(1)?,
                        author_name: row
                            .get::<_, Option<String>>(2)?
                            .unwrap_or_else(|| "unknown".to_string()),
                        title: row.get(3)?,
                        description: row.get(4)?,
                        file_id: row.get(5)?,
                        taken_on: row.get(6)?,
                        created_at: row.get(7)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Notes --

    pub fn insert_note(
        &self,
        id: &str,
        author_id: &str,
        title: Option<&str>,
        content: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO notes (id, author_id, title, content) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, author_id, title, content],
            )?;
            Ok(())
        })
    }

    pub fn list_notes(&self, limit: u32) -> Result<Vec<NoteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT n.id, n.author_id, u.display_name, n.title, n.content, n.created_at
                 FROM notes n
                 LEFT JOIN users u ON n.author_id = u.id
                 ORDER BY n.created_at DESC, n.rowid DESC
                 LIMIT ?1",
            )?;

            let rows = stmt
                .query_map([limit], |row| {
                    Ok(NoteRow {
                        id: row.get(0)?,
                        author_id: row.get(1)?,
                        author_name: row
                            .get::<_, Option<String>>(2)?
                            .unwrap_or_else(|| "unknown".to_string()),
                        title: row.get(3)?,
                        content: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Surprises --

    pub fn insert_surprise(
        &self,
        id: &str,
        author_id: &str,
        title: &str,
        content: Option<&str>,
        file_id: Option<&str>,
        media_kind: &str,
        unlock_date: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO surprises (id, author_id, title, content, file_id, media_kind, unlock_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![id, author_id, title, content, file_id, media_kind, unlock_date],
            )?;
            Ok(())
        })
    }

    pub fn list_surprises(&self, limit: u32) -> Result<Vec<SurpriseRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.author_id, u.display_name, s.title, s.content,
                        s.file_id, s.media_kind, s.unlock_date, s.unlocked, s.created_at
                 FROM surprises s
                 LEFT JOIN users u ON s.author_id = u.id
                 ORDER BY s.created_at DESC, s.rowid DESC
                 LIMIT ?1",
            )?;

            let rows = stmt
                .query_map([limit], |row| {
                    Ok(SurpriseRow {
                        id: row.get(0)?,
                        author_id: row.get(1)?,
                        author_name: row
                            .get::<_, Option<String>>(2)?
                            .unwrap_or_else(|| "unknown".to_string()),
                        title: row.get(3)?,
                        content: row.get(4)?,
                        file_id: row.get(5)?,
                        media_kind: row.get(6)?,
                        unlock_date: row.get(7)?,
                        unlocked: row.get(8)?,
                        created_at: row.get(9)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_user(conn: &Connection, sql: &str, key: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(sql)?;

    let row = stmt
        .query_row([key], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                display_name: row.get(2)?,
                password: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn db_with_user(id: &str) -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_user(id, "david", "David", "argon2-hash").unwrap();
        db
    }

    #[test]
    fn user_round_trip_and_uniqueness() {
        let db = db_with_user("u1");

        let user = db.get_user_by_username("david").unwrap().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.display_name, "David");
        assert!(db.get_user_by_username("shalom").unwrap().is_none());
        assert_eq!(db.get_user_by_id("u1").unwrap().unwrap().username, "david");

        // Second registration with the same username must fail.
        assert!(db.create_user("u2", "david", "Other", "hash").is_err());
    }

    #[test]
    fn photo_feed_is_newest_first_with_author_name() {
        let db = db_with_user("u1");
        db.insert_file("f1", "u1", "image/jpeg", 1024).unwrap();
        db.insert_file("f2", "u1", "image/png", 2048).unwrap();

        db.insert_photo("p1", "u1", Some("first"), None, "f1").unwrap();
        db.insert_photo("p2", "u1", None, Some("sunset"), "f2").unwrap();

        let photos = db.list_photos(50).unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, "p2");
        assert_eq!(photos[1].id, "p1");
        assert_eq!(photos[0].author_name, "David");
        assert_eq!(photos[1].title.as_deref(), Some("first"));

        let truncated = db.list_photos(1).unwrap();
        assert_eq!(truncated.len(), 1);
    }

    #[test]
    fn note_round_trip() {
        let db = db_with_user("u1");
        db.insert_note("n1", "u1", None, "missing you today").unwrap();

        let notes = db.list_notes(10).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "missing you today");
        assert!(notes[0].title.is_none());
        assert_eq!(notes[0].author_name, "David");
    }

    #[test]
    fn surprise_round_trip_keeps_lock_fields() {
        let db = db_with_user("u1");
        db.insert_surprise(
            "s1",
            "u1",
            "open on day 50",
            Some("surprise!"),
            None,
            "text",
            "2026-02-04",
        )
        .unwrap();

        let surprises = db.list_surprises(10).unwrap();
        assert_eq!(surprises.len(), 1);
        let s = &surprises[0];
        assert_eq!(s.unlock_date, "2026-02-04");
        assert_eq!(s.media_kind, "text");
        assert!(!s.unlocked);
        assert!(s.file_id.is_none());
    }

    #[test]
    fn file_lookup_misses_cleanly() {
        let db = db_with_user("u1");
        db.insert_file("f1", "u1", "audio/mpeg", 77).unwrap();

        let file = db.get_file("f1").unwrap().unwrap();
        assert_eq!(file.content_type, "audio/mpeg");
        assert_eq!(file.size, 77);
        assert!(db.get_file("missing").unwrap().is_none());
    }
}
