//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no storage dependencies.

mod entity;
mod item;
mod list;
mod list_type;

pub use entity::{normalize_text, DomainError, DomainResult, Entity};
pub use item::{active_items, completed_items, partition_items, Item, ItemChange};
pub use list::{List, ListUpdate};
pub use list_type::{is_reset_due, ListType, ResetPeriod};
