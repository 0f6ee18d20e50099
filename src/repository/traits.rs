//! Repository Layer - Core Traits
//!
//! The CRUD contract shared by the task and user repositories. Operations are
//! async so the SQLite backing can sit behind an async lock; the traits say
//! nothing about SQLite, and tests may substitute other backends.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// CRUD over one entity type
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a new entity; the returned copy carries the assigned id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity; missing entities are an error
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete by id. Deleting an absent entity is not an error.
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories whose entities can be found by text
#[async_trait]
pub trait SearchableRepository<T: Entity>: Repository<T> {
    /// Entities whose text matches the query
    async fn search(&self, query: &str) -> DomainResult<Vec<T>>;
}
