//! Checklist Service
//!
//! Business logic for lists and items. The store is the single source of
//! truth: nothing here caches children or mirrors collections. Methods that
//! mutate a record take it by `&mut` and only write the new state back once
//! the store accepted it. Item edits are applied to the stored row, so a
//! stale caller copy (say, from before a reset) is refreshed, never saved.

use chrono::Local;
use uuid::Uuid;

use crate::domain::{
    active_items, completed_items, is_reset_due, normalize_text, partition_items, DomainResult,
    Item, ItemChange, List, ListType, ListUpdate,
};
use crate::repository::{
    DbState, ItemCompletionOperations, ItemListTouchOperations, ItemRepository,
    ListQueryOperations, ListRepository, ListResetOperations, Repository,
};
use super::clock::{Clock, SystemClock};

/// Title used by `ensure_default_list` when the caller has no preference
pub const DEFAULT_LIST_TITLE: &str = "My Checklist";

/// Domain service for checklists and their items
pub struct ChecklistService<C: Clock = SystemClock> {
    lists: ListRepository,
    items: ItemRepository,
    clock: C,
}

impl ChecklistService<SystemClock> {
    pub fn new(db: &DbState) -> Self {
        Self::with_clock(db, SystemClock)
    }
}

impl<C: Clock> ChecklistService<C> {
    pub fn with_clock(db: &DbState, clock: C) -> Self {
        Self {
            lists: ListRepository::new(db.connection()),
            items: ItemRepository::new(db.connection()),
            clock,
        }
    }

    // ========================
    // List operations
    // ========================

    /// Create and persist a new list
    pub fn create_list(
        &self,
        title: &str,
        list_type: ListType,
        color: Option<String>,
        icon: Option<String>,
    ) -> DomainResult<List> {
        let title = normalize_text("title", title)?;
        let list = List::new(title, list_type, color, icon, self.clock.now());
        let list = self.lists.create(&list)?;
        log::info!("Created {} list {}", list.list_type, list.id);
        Ok(list)
    }

    /// `create_list` with a custom type and no color or icon
    pub fn create_list_titled(&self, title: &str) -> DomainResult<List> {
        self.create_list(title, ListType::Custom, None, None)
    }

    /// Return the first non-archived list titled `title`, creating it if
    /// there is none.
    ///
    /// Lookup and creation are separate store calls. Two callers racing on
    /// the same missing title can both create a list, leaving duplicates.
    pub fn ensure_default_list(&self, title: &str, list_type: ListType) -> DomainResult<List> {
        let title = normalize_text("title", title)?;
        if let Some(existing) = self.lists.find_active_by_title(&title)? {
            return Ok(existing);
        }
        self.create_list(&title, list_type, None, None)
    }

    /// Apply the provided fields and touch the list
    pub fn update_list(&self, list: &mut List, update: ListUpdate) -> DomainResult<()> {
        let update = ListUpdate {
            title: update.title.map(|t| normalize_text("title", &t)).transpose()?,
            ..update
        };
        let mut next = list.clone();
        next.apply(update, self.clock.now());
        self.lists.update(&next)?;
        *list = next;
        Ok(())
    }

    /// Archive (soft delete) or restore a list
    pub fn mark_archived(&self, list: &mut List, archived: bool) -> DomainResult<()> {
        let mut next = list.clone();
        next.is_archived = archived;
        next.touch(self.clock.now());
        self.lists.update(&next)?;
        *list = next;
        log::info!("List {} archived={}", list.id, archived);
        Ok(())
    }

    /// Delete lists together with all their items
    pub fn delete_lists(&self, lists: &[List]) -> DomainResult<()> {
        if lists.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = lists.iter().map(|l| l.id).collect();
        let removed = self.lists.delete_many(&ids)?;
        log::info!("Deleted {} of {} lists", removed, ids.len());
        Ok(())
    }

    /// Non-archived lists, most recently touched first
    pub fn fetch_active_lists(&self) -> DomainResult<Vec<List>> {
        self.lists.find_active()
    }

    pub fn fetch_list(&self, id: Uuid) -> DomainResult<Option<List>> {
        self.lists.find_by_id(id)
    }

    // ========================
    // Item operations
    // ========================

    /// Append a new item to `list` and touch the list
    pub fn add_item(&self, text: &str, list: &mut List) -> DomainResult<Item> {
        let text = normalize_text("text", text)?;
        let now = self.clock.now();
        // Order is assigned by the store in the same transaction
        let item = self.items.append_to_list(&Item::new(list.id, text, 0, now), now)?;
        list.touch(now);
        log::debug!("Added item {} to list {} at order {}", item.id, list.id, item.order);
        Ok(item)
    }

    /// Replace the item's text and touch its list
    pub fn update_item(&self, item: &mut Item, text: &str) -> DomainResult<()> {
        let text = normalize_text("text", text)?;
        self.change_item(item, ItemChange::Text(text))
    }

    /// Flip the stored completion state
    pub fn toggle_completion(&self, item: &mut Item) -> DomainResult<()> {
        self.change_item(item, ItemChange::ToggleCompleted)
    }

    /// Set completion state explicitly
    pub fn mark_completed(&self, item: &mut Item, completed: bool) -> DomainResult<()> {
        self.change_item(item, ItemChange::Completed(completed))
    }

    /// Overwrite the item's order. Collisions with other items are allowed.
    pub fn update_item_order(&self, item: &mut Item, order: i64) -> DomainResult<()> {
        self.change_item(item, ItemChange::Order(order))
    }

    /// Delete items, touching each owning list once
    pub fn delete_items(&self, items: &[Item]) -> DomainResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        let removed = self.items.delete_touching_lists(items, self.clock.now())?;
        log::info!("Deleted {} items", removed);
        Ok(())
    }

    pub fn fetch_item(&self, id: Uuid) -> DomainResult<Option<Item>> {
        self.items.find_by_id(id)
    }

    /// Every item of a list, by order
    pub fn fetch_items(&self, list_id: Uuid) -> DomainResult<Vec<Item>> {
        self.items.find_by_list(list_id)
    }

    /// Pending items of a list, ascending by order
    pub fn active_items(&self, list_id: Uuid) -> DomainResult<Vec<Item>> {
        Ok(active_items(&self.fetch_items(list_id)?))
    }

    /// Completed items of a list, most recently completed first
    pub fn completed_items(&self, list_id: Uuid) -> DomainResult<Vec<Item>> {
        Ok(completed_items(&self.fetch_items(list_id)?))
    }

    /// Both views of a list from a single fetch: `(active, completed)`
    pub fn partitioned_items(&self, list_id: Uuid) -> DomainResult<(Vec<Item>, Vec<Item>)> {
        Ok(partition_items(&self.fetch_items(list_id)?))
    }

    /// Completed items across all non-archived lists, most recently
    /// updated first
    pub fn fetch_completed_items(&self) -> DomainResult<Vec<Item>> {
        self.items.find_completed_in_active_lists()
    }

    // ========================
    // Reset operations
    // ========================

    /// Whether the list's reset period has rolled over since its last reset,
    /// judged in the local calendar
    pub fn should_reset_list(&self, list: &List) -> bool {
        is_reset_due(list.list_type, list.last_reset_date.as_ref(), &self.clock.now(), &Local)
    }

    /// Clear completion state of every item in the list and record the
    /// reset. Lists without auto-reset are left alone.
    pub fn reset_list(&self, list: &mut List) -> DomainResult<()> {
        if !list.list_type.supports_auto_reset() {
            return Ok(());
        }
        let now = self.clock.now();
        let touched = self.lists.reset(list.id, now)?;
        list.last_reset_date = Some(now);
        list.touch(now);
        log::info!("Reset {} list {} ({} items)", list.list_type, list.id, touched);
        Ok(())
    }

    /// Reset every active list whose period has rolled over, all in one
    /// transaction. Returns the number of lists reset.
    pub fn check_and_reset_lists(&self) -> DomainResult<usize> {
        let due: Vec<Uuid> = self
            .fetch_active_lists()?
            .iter()
            .filter(|list| self.should_reset_list(list))
            .map(|list| list.id)
            .collect();
        if due.is_empty() {
            return Ok(0);
        }
        let touched = self.lists.reset_many(&due, self.clock.now())?;
        log::info!("Auto-reset {} lists ({} items)", due.len(), touched);
        Ok(due.len())
    }

    // Apply `change` to the stored item, then refresh the caller's copy
    fn change_item(&self, item: &mut Item, change: ItemChange) -> DomainResult<()> {
        *item = self.items.change_touching_list(item.id, change, self.clock.now())?;
        Ok(())
    }
}
