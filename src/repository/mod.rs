//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod db;
mod item;
mod list;
mod traits;


pub use db::{init_db, DbState, SharedConnection};
pub use item::{ItemCompletionOperations, ItemListTouchOperations, ItemRepository};
pub use list::{ListQueryOperations, ListRepository, ListResetOperations};
pub use traits::Repository;
