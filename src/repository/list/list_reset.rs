//! List Reset Operations
//!
//! Clears completion state of every item in a list and records the reset.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};
use crate::repository::db;
use super::list_repo::ListRepository;

/// Trait for list reset operations
pub trait ListResetOperations {
    /// Mark every item of the list incomplete, clear completion dates,
    /// touch the items, then stamp `last_reset_date` and `updated_at` on
    /// the list. Runs in one transaction. Returns the number of items
    /// touched.
    fn reset(&self, list_id: Uuid, at: DateTime<Utc>) -> DomainResult<usize>;

    /// `reset` for several lists in a single transaction. Either every
    /// list is reset or none is.
    fn reset_many(&self, list_ids: &[Uuid], at: DateTime<Utc>) -> DomainResult<usize>;
}

impl ListResetOperations for ListRepository {
    fn reset(&self, list_id: Uuid, at: DateTime<Utc>) -> DomainResult<usize> {
        self.reset_many(&[list_id], at)
    }

    fn reset_many(&self, list_ids: &[Uuid], at: DateTime<Utc>) -> DomainResult<usize> {
        if list_ids.is_empty() {
            return Ok(0);
        }
        let at = db::to_millis(at);
        let mut conn = db::lock(&self.conn)?;
        let tx = conn.transaction()?;

        let mut items_touched = 0;
        for list_id in list_ids {
            // tx rolls back on drop
            items_touched += reset_in(&tx, *list_id, at)?;
        }

        tx.commit()?;
        Ok(items_touched)
    }
}

fn reset_in(conn: &Connection, list_id: Uuid, at: i64) -> DomainResult<usize> {
    let list_changed = conn.execute(
        "UPDATE lists SET last_reset_date = ?1, updated_at = ?1 WHERE id = ?2",
        params![at, list_id.to_string()],
    )?;
    if list_changed == 0 {
        return Err(DomainError::NotFound(format!("List {}", list_id)));
    }

    let items_touched = conn.execute(
        "UPDATE items SET completed = 0, completion_date = NULL, updated_at = ?1 WHERE list_id = ?2",
        params![at, list_id.to_string()],
    )?;
    Ok(items_touched)
}
