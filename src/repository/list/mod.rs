//! List Repository Module
//!
//! - list_repo: Core CRUD operations
//! - list_queries: Active-list lookups, bulk delete
//! - list_reset: Auto-reset of item completion state

mod list_queries;
mod list_repo;
mod list_reset;

pub use list_repo::ListRepository;

pub use list_queries::ListQueryOperations;
pub use list_reset::ListResetOperations;

pub(crate) use list_repo::touch_in;
