//! SQLite suggestion store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use crate::application::errors::StorageError;
use crate::domain::entities::Suggestion;
use crate::domain::traits::SuggestionStore;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        init_tables(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

fn init_tables(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS suggestions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            user_name TEXT NOT NULL,
            guild_id TEXT,
            text TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_suggestions_user ON suggestions(user_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_suggestions_created ON suggestions(created_at)",
        [],
    )?;

    Ok(())
}

// Discord snowflakes exceed i64 in theory, so ids are stored as text
fn parse_id(raw: &str) -> Result<u64, StorageError> {
    raw.parse().map_err(|_| StorageError::Serialization(format!("Invalid id: {}", raw)))
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Serialization(format!("Invalid timestamp {}: {}", raw, e)))
}

#[async_trait]
impl SuggestionStore for Database {
    async fn add(&self, suggestion: &Suggestion) -> Result<(), StorageError> {
        self.conn()?.execute(
            "INSERT INTO suggestions (id, user_id, user_name, guild_id, text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                suggestion.id,
                suggestion.user_id.to_string(),
                suggestion.user_name,
                suggestion.guild_id.map(|g| g.to_string()),
                suggestion.text,
                suggestion.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Suggestion>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, user_name, guild_id, text, created_at
             FROM suggestions ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut suggestions = Vec::new();
        for row in rows {
            let (id, user_id, user_name, guild_id, text, created_at) = row?;
            suggestions.push(Suggestion {
                id,
                user_id: parse_id(&user_id)?,
                user_name,
                guild_id: guild_id.as_deref().map(parse_id).transpose()?,
                text,
                created_at: parse_time(&created_at)?,
            });
        }
        Ok(suggestions)
    }

    async fn count_for_user(&self, user_id: u64) -> Result<u64, StorageError> {
        let count: Option<i64> = self.conn()?
            .query_row(
                "SELECT COUNT(*) FROM suggestions WHERE user_id = ?1",
                params![user_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0) as u64)
    }
}
