use thiserror::Error;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(String),
    /// The object key was rejected before reaching the backend.
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    /// The storage client could not be constructed from configuration.
    #[error("storage configuration error: {0}")]
    Config(String),
    /// The backend rejected or failed the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}
