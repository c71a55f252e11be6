use std::time::Duration;

use async_trait::async_trait;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::debug;

use super::error::StorageError;
use super::traits::ObjectStore;
use crate::config::StorageConfig;

/// S3 (or S3-compatible) object store.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    base_url: String,
}

impl S3ObjectStore {
    /// Build a client from configuration. No network calls are made here.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse::<Region>().map_err(|e| {
                StorageError::Config(format!("invalid region {:?}: {e}", config.region))
            })?,
        };

        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => Credentials::new(
                Some(access_key.as_str()),
                Some(secret_key.as_str()),
                None,
                None,
                None,
            ),
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::Config(format!("credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Config(e.to_string()))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            base_url: config.public_base_url(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let content_type = HeaderValue::from_str(content_type)
            .map_err(|e| StorageError::Backend(format!("invalid content type: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type);

        let expiry_secs = u32::try_from(expires_in.as_secs()).unwrap_or(u32::MAX);

        self.bucket
            .presign_put(format!("/{key}"), expiry_secs, Some(headers), None)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let pages = self
            .bucket
            .list(prefix.to_string(), None)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let keys: Vec<String> = pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| object.key)
            .collect();
        debug!(prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        match response.status_code() {
            200..=299 => {
                debug!(key, "deleted object");
                Ok(())
            }
            404 => Err(StorageError::NotFound(key.to_string())),
            status => Err(StorageError::Backend(format!(
                "delete of {key} returned status {status}"
            ))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }
}
