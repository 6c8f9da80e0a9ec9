//! List Query Operations
//!
//! Lookups over non-archived lists, plus bulk delete.

use rusqlite::params;
use uuid::Uuid;

use crate::domain::{DomainResult, List};
use crate::repository::db;
use super::list_repo::{row_to_list, ListRepository, LIST_COLUMNS};

/// Trait for list lookup and maintenance operations
pub trait ListQueryOperations {
    /// Non-archived lists, most recently touched first
    fn find_active(&self) -> DomainResult<Vec<List>>;

    /// First (oldest) non-archived list with exactly this title
    fn find_active_by_title(&self, title: &str) -> DomainResult<Option<List>>;

    /// Delete several lists (and their items) atomically. Returns the
    /// number of lists removed.
    fn delete_many(&self, ids: &[Uuid]) -> DomainResult<usize>;
}

impl ListQueryOperations for ListRepository {
    fn find_active(&self) -> DomainResult<Vec<List>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM lists WHERE is_archived = 0 ORDER BY updated_at DESC, created_at DESC, rowid DESC",
            LIST_COLUMNS
        ))?;
        let mut rows = stmt.query([])?;

        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(row_to_list(row)?);
        }
        Ok(lists)
    }

    fn find_active_by_title(&self, title: &str) -> DomainResult<Option<List>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM lists WHERE title = ?1 AND is_archived = 0 ORDER BY created_at ASC, rowid ASC LIMIT 1",
            LIST_COLUMNS
        ))?;
        let mut rows = stmt.query(params![title])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_list(row)?)),
            None => Ok(None),
        }
    }

    fn delete_many(&self, ids: &[Uuid]) -> DomainResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut conn = db::lock(&self.conn)?;
        let tx = conn.transaction()?;
        let mut removed = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM lists WHERE id = ?1")?;
            for id in ids {
                removed += stmt.execute(params![id.to_string()])?;
            }
        }
        tx.commit()?;
        Ok(removed)
    }
}
