//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Connection shared by every repository
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
    path: PathBuf,
}

impl DbState {
    pub fn connection(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Initialize database with path. `":memory:"` opens a private in-memory
/// database.
pub fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| DomainError::Internal(format!("Failed to create {}: {}", dir.display(), e)))?;
        }
        Connection::open(db_path)?
    };

    // Item cascade on list delete relies on this; it is per-connection.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    run_migrations(&conn)?;
    log::info!("Checklist store opened at {}", db_path.display());

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
        path: db_path.to_path_buf(),
    })
}

/// Lock the shared connection
pub(crate) fn lock(conn: &SharedConnection) -> DomainResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| DomainError::Internal("Database connection lock poisoned".to_string()))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS lists (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            list_type TEXT NOT NULL DEFAULT 'custom',
            color TEXT,
            icon TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            is_archived INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    // Auto-reset arrived after the first schema
    if !column_exists(conn, "lists", "last_reset_date")? {
        conn.execute("ALTER TABLE lists ADD COLUMN last_reset_date INTEGER", [])
            .map_err(|e| DomainError::Internal(format!("Failed to add last_reset_date: {}", e)))?;
        log::debug!("Added lists.last_reset_date");
    }

    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            list_id TEXT NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
            text TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            completion_date INTEGER,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_list ON items(list_id, position)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_lists_active ON lists(is_archived, updated_at)",
        [],
    )?;

    Ok(())
}

pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(millis: i64) -> DomainResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| DomainError::Internal(format!("Timestamp out of range: {}", millis)))
}

pub(crate) fn opt_from_millis(millis: Option<i64>) -> DomainResult<Option<DateTime<Utc>>> {
    millis.map(from_millis).transpose()
}

pub(crate) fn uuid_column(row: &Row<'_>, idx: usize) -> DomainResult<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::Internal(format!("Bad id {}: {}", raw, e)))
}
