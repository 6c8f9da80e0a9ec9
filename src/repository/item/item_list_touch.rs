//! Item Writes That Touch The Owning List
//!
//! Every mutation of an item bumps `updated_at` on its list. Each
//! operation here does both in one transaction.

use chrono::{DateTime, Utc};
use rusqlite::params;
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Item, ItemChange};
use crate::repository::db;
use crate::repository::list::touch_in;
use super::item_positioning::next_order_in;
use super::item_repo::{find_in, insert_in, update_in, ItemRepository};

/// Trait for item writes that also touch the owning list
pub trait ItemListTouchOperations {
    /// Insert `item` at the end of its list (order = max + 1) and touch
    /// the list. Returns the item with its assigned order.
    fn append_to_list(&self, item: &Item, at: DateTime<Utc>) -> DomainResult<Item>;

    /// Apply `change` to the stored item and touch its list. Returns the
    /// item as stored afterwards.
    fn change_touching_list(&self, id: Uuid, change: ItemChange, at: DateTime<Utc>)
        -> DomainResult<Item>;

    /// Delete items and touch each distinct owning list once. Returns the
    /// number of items removed.
    fn delete_touching_lists(&self, items: &[Item], at: DateTime<Utc>) -> DomainResult<usize>;
}

impl ItemListTouchOperations for ItemRepository {
    fn append_to_list(&self, item: &Item, at: DateTime<Utc>) -> DomainResult<Item> {
        let mut conn = db::lock(&self.conn)?;
        let tx = conn.transaction()?;

        if !touch_in(&tx, item.list_id, db::to_millis(at))? {
            return Err(DomainError::NotFound(format!("List {}", item.list_id)));
        }

        let mut appended = item.clone();
        appended.order = next_order_in(&tx, item.list_id)?;
        insert_in(&tx, &appended)?;

        tx.commit()?;
        Ok(appended)
    }

    fn change_touching_list(
        &self,
        id: Uuid,
        change: ItemChange,
        at: DateTime<Utc>,
    ) -> DomainResult<Item> {
        let mut conn = db::lock(&self.conn)?;
        let tx = conn.transaction()?;

        let mut item = find_in(&tx, id)?.ok_or_else(|| DomainError::NotFound(format!("Item {}", id)))?;
        item.apply(change, at);
        update_in(&tx, &item)?;
        if !touch_in(&tx, item.list_id, db::to_millis(at))? {
            return Err(DomainError::NotFound(format!("List {}", item.list_id)));
        }

        tx.commit()?;
        Ok(item)
    }

    fn delete_touching_lists(&self, items: &[Item], at: DateTime<Utc>) -> DomainResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        let at = db::to_millis(at);
        let mut conn = db::lock(&self.conn)?;
        let tx = conn.transaction()?;

        let mut removed = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM items WHERE id = ?1")?;
            for item in items {
                removed += stmt.execute(params![item.id.to_string()])?;
            }
        }

        let affected: HashSet<Uuid> = items.iter().map(|i| i.list_id).collect();
        for list_id in affected {
            touch_in(&tx, list_id, at)?;
        }

        tx.commit()?;
        Ok(removed)
    }
}
