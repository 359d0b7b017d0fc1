//! Storage collaborator trait

use crate::core::resource::Resource;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for storing resources of one type
///
/// The shaping core never talks to storage itself; it consumes the
/// snapshot returned by [`list`](DataService::list). Implementations decide
/// how that snapshot is produced.
#[async_trait]
pub trait DataService<T: Resource>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities as one materialized snapshot
    async fn list(&self) -> Result<Vec<T>>;

    /// Delete an entity
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Check whether an entity exists
    async fn exists(&self, id: &Uuid) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }
}
