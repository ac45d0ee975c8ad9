//! File-based Key-Value Store Adapter
//!
//! Each key is stored as `<data_dir>/<key>.json`. Writes go through a
//! temporary file and a rename so a crash never leaves a half-written value.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{validate_key, KeyValueStore, StorageError};

/// File-backed durable store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_path`. The directory is created lazily
    /// on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let bytes = match fs::read(self.value_path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::IoError(e.to_string())),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StorageError::DeserializationFailed(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.ensure_dir().await?;

        let path = self.value_path(key);
        let tmp = self.base_path.join(format!(".{}.tmp", key));
        fs::write(&tmp, value)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.value_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set("learner_profile", r#"{"name":"Alice"}"#).await.unwrap();

        let loaded = store.get("learner_profile").await.unwrap();
        assert_eq!(loaded.as_deref(), Some(r#"{"name":"Alice"}"#));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        assert_eq!(store.get("api_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn creates_nested_data_dir_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("a").join("b"));

        store.set("api_key", "k").await.unwrap();
        assert!(temp_dir.path().join("a/b/api_key.json").exists());
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        FileKeyValueStore::new(temp_dir.path())
            .set("api_key", "first")
            .await
            .unwrap();
        FileKeyValueStore::new(temp_dir.path())
            .set("api_key", "second")
            .await
            .unwrap();

        let reopened = FileKeyValueStore::new(temp_dir.path());
        assert_eq!(reopened.get("api_key").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set("api_key", "k").await.unwrap();
        store.remove("api_key").await.unwrap();
        store.remove("api_key").await.unwrap();
        assert_eq!(store.get("api_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_utf8_value_is_a_deserialization_failure() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        std::fs::write(temp_dir.path().join("learner_profile.json"), [0xff, 0xfe, b'{', 0x80]).unwrap();

        let err = store.get("learner_profile").await.unwrap_err();
        assert!(matches!(err, StorageError::DeserializationFailed(_)));
    }

    #[tokio::test]
    async fn rejects_path_traversal_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        let err = store.set("../escape", "x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
