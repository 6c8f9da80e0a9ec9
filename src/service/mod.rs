//! Service Layer
//!
//! Checklist business logic on top of the repositories.

mod checklist_service;
mod clock;


pub use checklist_service::{ChecklistService, DEFAULT_LIST_TITLE};
pub use clock::{Clock, FixedClock, SystemClock};
