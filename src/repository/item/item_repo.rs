//! Item Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Item CRUD operations.
//! Specialized operations are in separate modules:
//! - item_positioning: order assignment within a list
//! - item_list_touch: item writes that also touch the owning list
//! - item_completion: cross-list completion queries

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Item};
use crate::repository::db::{self, SharedConnection};
use crate::repository::traits::Repository;

pub(super) const ITEM_COLUMNS: &str =
    "id, list_id, text, completed, completion_date, position, created_at, updated_at";

/// SQLite implementation of Item repository
pub struct ItemRepository {
    pub(super) conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// All items of a list by order (ties by creation)
    pub fn find_by_list(&self, list_id: Uuid) -> DomainResult<Vec<Item>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM items WHERE list_id = ?1 ORDER BY position ASC, created_at ASC, rowid ASC",
            ITEM_COLUMNS
        ))?;
        let mut rows = stmt.query(params![list_id.to_string()])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(row_to_item(row)?);
        }
        Ok(items)
    }
}

impl Repository<Item> for ItemRepository {
    fn create(&self, entity: &Item) -> DomainResult<Item> {
        let conn = db::lock(&self.conn)?;
        insert_in(&conn, entity)?;
        Ok(entity.clone())
    }

    fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Item>> {
        let conn = db::lock(&self.conn)?;
        find_in(&conn, id)
    }

    fn list(&self) -> DomainResult<Vec<Item>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM items ORDER BY list_id, position ASC, created_at ASC, rowid ASC",
            ITEM_COLUMNS
        ))?;
        let mut rows = stmt.query([])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(row_to_item(row)?);
        }
        Ok(items)
    }

    fn update(&self, entity: &Item) -> DomainResult<Item> {
        let conn = db::lock(&self.conn)?;
        update_in(&conn, entity)?;
        Ok(entity.clone())
    }

    fn delete(&self, id: Uuid) -> DomainResult<()> {
        let conn = db::lock(&self.conn)?;
        conn.execute("DELETE FROM items WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }
}

pub(super) fn find_in(conn: &Connection, id: Uuid) -> DomainResult<Option<Item>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM items WHERE id = ?1", ITEM_COLUMNS))?;
    let mut rows = stmt.query(params![id.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_item(row)?)),
        None => Ok(None),
    }
}

pub(super) fn insert_in(conn: &Connection, entity: &Item) -> DomainResult<()> {
    conn.execute(
        &format!("INSERT INTO items ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)", ITEM_COLUMNS),
        params![
            entity.id.to_string(),
            entity.list_id.to_string(),
            entity.text,
            entity.is_completed,
            entity.completion_date.map(db::to_millis),
            entity.order,
            db::to_millis(entity.created_at),
            db::to_millis(entity.updated_at),
        ],
    )?;
    Ok(())
}

/// Overwrite the mutable columns of an item. The owning list never changes.
pub(super) fn update_in(conn: &Connection, entity: &Item) -> DomainResult<()> {
    let changed = conn.execute(
        "UPDATE items SET text = ?1, completed = ?2, completion_date = ?3, position = ?4, updated_at = ?5 WHERE id = ?6",
        params![
            entity.text,
            entity.is_completed,
            entity.completion_date.map(db::to_millis),
            entity.order,
            db::to_millis(entity.updated_at),
            entity.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DomainError::NotFound(format!("Item {}", entity.id)));
    }
    Ok(())
}

/// Convert a database row to Item
pub(super) fn row_to_item(row: &Row<'_>) -> DomainResult<Item> {
    Ok(Item {
        id: db::uuid_column(row, 0)?,
        list_id: db::uuid_column(row, 1)?,
        text: row.get(2)?,
        is_completed: row.get(3)?,
        completion_date: db::opt_from_millis(row.get(4)?)?,
        order: row.get(5)?,
        created_at: db::from_millis(row.get(6)?)?,
        updated_at: db::from_millis(row.get(7)?)?,
    })
}
