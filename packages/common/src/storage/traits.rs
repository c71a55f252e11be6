use std::time::Duration;

use async_trait::async_trait;

use super::error::StorageError;

/// Key-addressed object storage with presigned uploads.
///
/// Clients never stream bytes through the server: uploads go straight to the
/// backend against a URL minted by [`ObjectStore::presign_put`].
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Mint a time-limited URL that allows a single `PUT` of `key` with the
    /// given content type.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// List every key starting with `prefix`, in lexicographic order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Delete the object stored under exactly `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// The permanent public URL of `key`.
    fn public_url(&self, key: &str) -> String;
}
