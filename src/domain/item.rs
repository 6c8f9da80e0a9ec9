//! Item Entity
//!
//! A single checklist entry belonging to exactly one list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// A checklist entry
///
/// `completion_date` is `Some` exactly when `is_completed` is true; go
/// through [`Item::set_completed`] to keep the two in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: Uuid,
    /// Owning list
    pub list_id: Uuid,
    pub text: String,
    pub is_completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    /// Position within the list. Assigned as max + 1, never renumbered.
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new pending item for `list_id`
    pub fn new(list_id: Uuid, text: String, order: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id,
            text,
            is_completed: false,
            completion_date: None,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    /// Set completion state, stamping or clearing the completion date
    pub fn set_completed(&mut self, completed: bool, at: DateTime<Utc>) {
        self.is_completed = completed;
        self.completion_date = if completed { Some(at) } else { None };
        self.touch(at);
    }

    /// Apply a single field change and touch the item
    pub fn apply(&mut self, change: ItemChange, at: DateTime<Utc>) {
        match change {
            ItemChange::Text(text) => {
                self.text = text;
                self.touch(at);
            }
            ItemChange::Order(order) => {
                self.order = order;
                self.touch(at);
            }
            ItemChange::Completed(completed) => self.set_completed(completed, at),
            ItemChange::ToggleCompleted => self.set_completed(!self.is_completed, at),
        }
    }

    /// Instant used to rank completed items, newest first
    pub fn completed_sort_key(&self) -> DateTime<Utc> {
        self.completion_date.unwrap_or(self.updated_at)
    }
}

/// One edit to an item, applied to whatever state the store holds
#[derive(Debug, Clone, PartialEq)]
pub enum ItemChange {
    Text(String),
    Order(i64),
    Completed(bool),
    /// Flip the stored completion state
    ToggleCompleted,
}

impl Entity for Item {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Pending items, ascending by order. Ties keep their input order.
pub fn active_items(items: &[Item]) -> Vec<Item> {
    let mut active: Vec<Item> = items.iter().filter(|i| !i.is_completed).cloned().collect();
    active.sort_by_key(|i| i.order);
    active
}

/// Completed items, most recently completed first
pub fn completed_items(items: &[Item]) -> Vec<Item> {
    let mut completed: Vec<Item> = items.iter().filter(|i| i.is_completed).cloned().collect();
    completed.sort_by(|a, b| b.completed_sort_key().cmp(&a.completed_sort_key()));
    completed
}

/// Split items into `(active, completed)` views
pub fn partition_items(items: &[Item]) -> (Vec<Item>, Vec<Item>) {
    (active_items(items), completed_items(items))
}
