//! Koto Checklist Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//! - service: Checklist business logic consumed by the UI
//! - config / bootstrap: Settings and app wiring

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod repository;
pub mod service;

pub use bootstrap::App;
pub use config::AppConfig;
pub use domain::{DomainError, DomainResult, Item, ItemChange, List, ListType, ListUpdate};
pub use service::{ChecklistService, Clock, FixedClock, SystemClock, DEFAULT_LIST_TITLE};
