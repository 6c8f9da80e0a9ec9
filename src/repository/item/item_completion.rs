//! Item Completion Queries
//!
//! Queries over completed items across lists.

use crate::domain::{DomainResult, Item};
use crate::repository::db;
use super::item_repo::{row_to_item, ItemRepository};

/// Trait for cross-list completion queries
pub trait ItemCompletionOperations {
    /// Completed items of every non-archived list, most recently updated
    /// first
    fn find_completed_in_active_lists(&self) -> DomainResult<Vec<Item>>;
}

impl ItemCompletionOperations for ItemRepository {
    fn find_completed_in_active_lists(&self) -> DomainResult<Vec<Item>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT i.id, i.list_id, i.text, i.completed, i.completion_date, i.position, i.created_at, i.updated_at
             FROM items i
             JOIN lists l ON l.id = i.list_id
             WHERE i.completed = 1 AND l.is_archived = 0
             ORDER BY i.updated_at DESC, i.rowid DESC",
        )?;
        let mut rows = stmt.query([])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(row_to_item(row)?);
        }
        Ok(items)
    }
}
