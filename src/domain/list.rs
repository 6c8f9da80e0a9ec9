//! List Entity
//!
//! A named, typed collection of checklist items. Items are not held here;
//! the store owns the parent/child relationship.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;
use super::list_type::ListType;

/// A checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Unique identifier
    pub id: Uuid,
    pub title: String,
    pub list_type: ListType,
    /// Color name or hex string chosen by the UI
    pub color: Option<String>,
    /// Icon name chosen by the UI
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag; archived lists keep their items
    pub is_archived: bool,
    /// When completion state was last cleared by an auto-reset
    pub last_reset_date: Option<DateTime<Utc>>,
}

/// Partial update applied by `ChecklistService::update_list`.
/// Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListUpdate {
    pub title: Option<String>,
    pub list_type: Option<ListType>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl List {
    /// Create a new, never-reset list stamped at `now`
    pub fn new(
        title: String,
        list_type: ListType,
        color: Option<String>,
        icon: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            list_type,
            color,
            icon,
            created_at: now,
            updated_at: now,
            is_archived: false,
            last_reset_date: None,
        }
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    /// Apply the provided fields of `update`, then touch
    pub fn apply(&mut self, update: ListUpdate, at: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(list_type) = update.list_type {
            self.list_type = list_type;
        }
        if let Some(color) = update.color {
            self.color = Some(color);
        }
        if let Some(icon) = update.icon {
            self.icon = Some(icon);
        }
        self.touch(at);
    }
}

impl Entity for List {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}
