//! Flat key-value store
//!
//! Documents are stored as UTF-8 text under opaque string keys. The file
//! implementation keeps one file per key and writes atomically via a
//! temp file plus rename, so a crashed write never leaves a truncated
//! document behind.

use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::fs;

/// Key-value store collaborator: get returns the stored text or absence,
/// set overwrites wholesale.
pub trait KvStore: Clone + Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// File-backed store: one file per key under a root directory
#[derive(Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root directory if needed
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Key-value store initialized at: {:?}", self.root);
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path).await?;
        Ok(Some(text))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to temp file first, then rename into place
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Wrote key {} ({} bytes)", key, value.len());

        Ok(())
    }
}

/// In-memory store, used by tests and as a throwaway backend.
///
/// Writes can be made to fail on demand to exercise write-error paths.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<std::sync::Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent set() fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!("write rejected for key {}", key)));
        }

        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileKvStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKvStore::new(temp_dir.path().join("kv"));
        store.initialize().await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_get_absent_key_returns_none() {
        let (store, _temp) = create_test_store().await;

        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let (store, _temp) = create_test_store().await;

        store.set("greeting", "hello").await.unwrap();

        assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_set_overwrites_wholesale() {
        let (store, _temp) = create_test_store().await;

        store.set("doc", "first").await.unwrap();
        store.set("doc", "second").await.unwrap();

        assert_eq!(store.get("doc").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let (store, _temp) = create_test_store().await;

        store.set("doc", "value").await.unwrap();

        assert!(!store.path_for("doc").with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_memory_store_failure_toggle() {
        let store = MemoryKvStore::new();

        store.set("k", "v").await.unwrap();

        store.fail_writes(true);
        assert!(store.set("k", "other").await.is_err());

        // Previous value untouched by the failed write
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.fail_writes(false);
        store.set("k", "other").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("other"));
    }
}
