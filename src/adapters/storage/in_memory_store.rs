//! In-Memory Key-Value Store Adapter
//!
//! Useful for testing and for `storage.backend = "memory"`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{validate_key, KeyValueStore, StorageError};

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without going through the async port (test setup).
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.try_write() {
            values.insert(key.into(), value.into());
        }
        self
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryKeyValueStore::new();
        let other = store.clone();

        store.set("api_key", "k").await.unwrap();
        assert_eq!(other.get("api_key").await.unwrap().as_deref(), Some("k"));
    }

    #[tokio::test]
    async fn seeded_value_is_readable() {
        let store = InMemoryKeyValueStore::new().with_value("learner_profile", "{}");
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("learner_profile").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn remove_deletes_key() {
        let store = InMemoryKeyValueStore::new().with_value("api_key", "k");
        store.remove("api_key").await.unwrap();
        assert!(store.is_empty().await);
    }
}
