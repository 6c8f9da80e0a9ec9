//! List Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for List CRUD operations.
//! Specialized operations are in separate modules:
//! - list_queries: active-list lookups, bulk delete
//! - list_reset: clearing completion state for a whole list

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, List, ListType};
use crate::repository::db::{self, SharedConnection};
use crate::repository::traits::Repository;

pub(super) const LIST_COLUMNS: &str =
    "id, title, list_type, color, icon, created_at, updated_at, is_archived, last_reset_date";

/// SQLite implementation of List repository
pub struct ListRepository {
    pub(super) conn: SharedConnection,
}

impl ListRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl Repository<List> for ListRepository {
    fn create(&self, entity: &List) -> DomainResult<List> {
        let conn = db::lock(&self.conn)?;
        conn.execute(
            &format!("INSERT INTO lists ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)", LIST_COLUMNS),
            params![
                entity.id.to_string(),
                entity.title,
                entity.list_type.as_str(),
                entity.color,
                entity.icon,
                db::to_millis(entity.created_at),
                db::to_millis(entity.updated_at),
                entity.is_archived,
                entity.last_reset_date.map(db::to_millis),
            ],
        )?;
        Ok(entity.clone())
    }

    fn find_by_id(&self, id: Uuid) -> DomainResult<Option<List>> {
        let conn = db::lock(&self.conn)?;
        find_in(&conn, id)
    }

    fn list(&self) -> DomainResult<Vec<List>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM lists ORDER BY created_at ASC, rowid ASC",
            LIST_COLUMNS
        ))?;
        let mut rows = stmt.query([])?;

        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(row_to_list(row)?);
        }
        Ok(lists)
    }

    fn update(&self, entity: &List) -> DomainResult<List> {
        let conn = db::lock(&self.conn)?;
        let changed = conn.execute(
            "UPDATE lists SET title = ?1, list_type = ?2, color = ?3, icon = ?4, updated_at = ?5, is_archived = ?6, last_reset_date = ?7 WHERE id = ?8",
            params![
                entity.title,
                entity.list_type.as_str(),
                entity.color,
                entity.icon,
                db::to_millis(entity.updated_at),
                entity.is_archived,
                entity.last_reset_date.map(db::to_millis),
                entity.id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("List {}", entity.id)));
        }
        Ok(entity.clone())
    }

    fn delete(&self, id: Uuid) -> DomainResult<()> {
        let conn = db::lock(&self.conn)?;
        // Items go with it through ON DELETE CASCADE
        conn.execute("DELETE FROM lists WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }
}

pub(super) fn find_in(conn: &Connection, id: Uuid) -> DomainResult<Option<List>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM lists WHERE id = ?1", LIST_COLUMNS))?;
    let mut rows = stmt.query(params![id.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_list(row)?)),
        None => Ok(None),
    }
}

/// Bump `updated_at` of a list. Returns whether the list exists.
pub(crate) fn touch_in(conn: &Connection, id: Uuid, at_millis: i64) -> DomainResult<bool> {
    let changed = conn.execute(
        "UPDATE lists SET updated_at = ?1 WHERE id = ?2",
        params![at_millis, id.to_string()],
    )?;
    Ok(changed > 0)
}

/// Convert a database row to List
pub(super) fn row_to_list(row: &Row<'_>) -> DomainResult<List> {
    Ok(List {
        id: db::uuid_column(row, 0)?,
        title: row.get(1)?,
        list_type: ListType::from_str(&row.get::<_, String>(2)?),
        color: row.get(3)?,
        icon: row.get(4)?,
        created_at: db::from_millis(row.get(5)?)?,
        updated_at: db::from_millis(row.get(6)?)?,
        is_archived: row.get(7)?,
        last_reset_date: db::opt_from_millis(row.get(8)?)?,
    })
}
