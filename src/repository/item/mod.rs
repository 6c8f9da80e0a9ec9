//! Item Repository Module
//!
//! This module provides item repository functionality split into specialized sub-modules:
//! - item_repo: Core CRUD operations
//! - item_positioning: Order assignment
//! - item_list_touch: Item writes that also touch the owning list
//! - item_completion: Completed-item queries across lists

mod item_completion;
mod item_list_touch;
mod item_positioning;
mod item_repo;

pub use item_repo::ItemRepository;

// Re-export all operation traits so they can be used by importing ItemRepository
pub use item_completion::ItemCompletionOperations;
pub use item_list_touch::ItemListTouchOperations;
