//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use crate::domain::{DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type. Calls are synchronous and run on the
/// caller's thread.
pub trait Repository<T: Entity> {
    /// Persist a new entity
    fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    fn list(&self) -> DomainResult<Vec<T>>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID. Deleting a missing entity is not an error.
    fn delete(&self, id: T::Id) -> DomainResult<()>;
}
