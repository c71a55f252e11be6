use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::storage::{ObjectKey, ObjectStore, StorageError, user_prefix};
use thiserror::Error;
use tracing::{error, instrument, warn};

use crate::models::image::PresignResponse;

#[derive(Debug, Error)]
pub enum ImageError {
    /// No such image, or it lives under another user's prefix.
    #[error("Image not found or access denied")]
    NotFound,
    #[error("{0}")]
    InvalidUpload(String),
    #[error("Failed to generate presigned URL")]
    Presign,
    #[error("Failed to delete image")]
    Delete,
}

/// Per-user image uploads backed by an [`ObjectStore`].
///
/// Every object lives under `{user_id}/`; that prefix is the only ownership
/// check.
#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn ObjectStore>,
    upload_expiry: Duration,
}

impl ImageService {
    pub fn new(store: Arc<dyn ObjectStore>, upload_expiry: Duration) -> Self {
        Self {
            store,
            upload_expiry,
        }
    }

    /// Mint a signed upload URL for a new object owned by `user_id`.
    #[instrument(skip(self))]
    pub async fn presign(
        &self,
        file_name: &str,
        file_type: &str,
        user_id: &str,
    ) -> Result<PresignResponse, ImageError> {
        let key = ObjectKey::for_upload(user_id, Utc::now().timestamp_millis(), file_name)
            .map_err(|e| ImageError::InvalidUpload(e.to_string()))?;

        let upload_url = self
            .store
            .presign_put(key.as_str(), file_type, self.upload_expiry)
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "presign failed");
                ImageError::Presign
            })?;

        Ok(PresignResponse {
            upload_url,
            image_url: self.store.public_url(key.as_str()),
        })
    }

    /// Public URLs of every object under the user's prefix.
    ///
    /// A storage failure yields an empty list, indistinguishable from a user
    /// with no images.
    pub async fn list_for_user(&self, user_id: &str) -> Vec<String> {
        match self.store.list(&user_prefix(user_id)).await {
            Ok(keys) => keys.iter().map(|key| self.store.public_url(key)).collect(),
            Err(e) => {
                warn!(user_id, error = %e, "listing images failed, returning none");
                Vec::new()
            }
        }
    }

    /// Delete the first object under the user's prefix whose key ends with
    /// `key`.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str, user_id: &str) -> Result<(), ImageError> {
        if key.is_empty() {
            return Err(ImageError::NotFound);
        }

        let keys = self.store.list(&user_prefix(user_id)).await.map_err(|e| {
            error!(error = %e, "listing images before delete failed");
            ImageError::Delete
        })?;
        let target = keys
            .into_iter()
            .find(|candidate| candidate.ends_with(key))
            .ok_or(ImageError::NotFound)?;

        self.store.delete(&target).await.map_err(|e| match e {
            StorageError::NotFound(_) => ImageError::NotFound,
            other => {
                error!(key = %target, error = %other, "delete failed");
                ImageError::Delete
            }
        })
    }
}
