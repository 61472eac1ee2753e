//! Key-value blob storage.
//!
//! The journal persists a handful of string records (the serialized entry
//! collection and the preference flags). `BlobStore` is the seam; sled backs
//! it on disk and `MemoryBlobStore` backs it in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

use crate::error::{JournalError, Result};

/// String-keyed storage of string values
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a record, `None` if it was never written
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    /// Overwrite a record
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Remove a record if present
    async fn remove_item(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key).await
    }
}

/// Blob store backed by an embedded sled database
#[derive(Clone)]
pub struct SledBlobStore {
    db: sled::Db,
}

impl SledBlobStore {
    /// Open (or create) the database directory at `path`
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        debug!(path = %path.display(), "Opened journal storage");
        Ok(Self { db })
    }

    /// In-memory database that is discarded on drop
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }
}

#[async_trait]
impl BlobStore for SledBlobStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.clone();
        let key = key.to_string();
        let value = tokio::task::spawn_blocking(move || db.get(key.as_bytes())).await??;

        value
            .map(|bytes| String::from_utf8(bytes.to_vec()).map_err(|e| JournalError::Backend(format!("Stored value is not UTF-8: {e}"))))
            .transpose()
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush_async().await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.db.remove(key.as_bytes())?;
        self.db.flush_async().await?;
        Ok(())
    }
}

/// Blob store held in process memory
#[derive(Default)]
pub struct MemoryBlobStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| JournalError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sled_round_trip() {
        let store = SledBlobStore::temporary().expect("temporary sled");
        assert_eq!(store.get_item("journalEntries").await.expect("get"), None);

        store.set_item("journalEntries", "[]").await.expect("set");
        assert_eq!(store.get_item("journalEntries").await.expect("get").as_deref(), Some("[]"));

        store.remove_item("journalEntries").await.expect("remove");
        assert_eq!(store.get_item("journalEntries").await.expect("get"), None);
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = MemoryBlobStore::new();
        store.set_item("@large_text_preference", "true").await.expect("set");
        assert_eq!(
            store.get_item("@large_text_preference").await.expect("get").as_deref(),
            Some("true")
        );
    }
}
