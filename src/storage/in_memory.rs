//! In-memory implementation of DataService for testing and development

use crate::core::{DataService, Resource};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Debug)]
pub struct InMemoryDataService<T> {
    entities: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
        }
    }
}

impl<T: Resource + Clone> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a service pre-populated with entities
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let map = entities.into_iter().map(|e| (e.id(), e)).collect();
        Self {
            entities: Arc::new(RwLock::new(map)),
        }
    }
}

impl<T: Resource + Clone> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Resource + Clone> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.values().cloned().collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.remove(id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: Uuid,
        text: String,
    }

    crate::impl_resource!(Note, "note", {
        "id" => id,
        "text" => text,
    });

    fn note(text: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = InMemoryDataService::new();
        let created = service.create(note("hello")).await.unwrap();

        let retrieved = service.get(&created.id).await.unwrap();
        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_list() {
        let service = InMemoryDataService::with_entities([note("a"), note("b")]);
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let service = InMemoryDataService::new();
        let created = service.create(note("gone")).await.unwrap();
        assert!(service.exists(&created.id).await.unwrap());

        service.delete(&created.id).await.unwrap();
        assert!(!service.exists(&created.id).await.unwrap());
        assert!(service.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let service = InMemoryDataService::new();
        let clone = service.clone();
        clone.create(note("shared")).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);
    }
}
