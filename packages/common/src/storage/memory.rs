use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use super::error::StorageError;
use super::traits::ObjectStore;

/// In-process object store.
///
/// Presigning does not create anything: objects appear only through
/// [`MemoryObjectStore::insert`], the way a real upload lands after the client
/// `PUT`s to the signed URL. The store can be switched into a failing mode to
/// exercise backend-error paths.
pub struct MemoryObjectStore {
    base_url: String,
    /// key -> content type
    objects: DashMap<String, String>,
    unavailable: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: DashMap::new(),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Record an object as uploaded.
    pub fn insert(&self, key: impl Into<String>, content_type: impl Into<String>) {
        self.objects.insert(key.into(), content_type.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// While set, every operation fails with [`StorageError::Backend`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::Backend("memory store is unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        self.check_available()?;
        Ok(format!(
            "{}/{key}?x-method=PUT&x-content-type={content_type}&x-expires={}",
            self.base_url,
            expires_in.as_secs()
        ))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.check_available()?;
        let mut keys: Vec<String> = self
            .objects
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.objects.remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }
}
