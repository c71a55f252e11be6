use std::fmt;

use super::error::StorageError;

/// Return the key prefix under which all of a user's objects live.
///
/// The trailing slash matters: it keeps `u1/` from matching objects of `u10`.
pub fn user_prefix(user_id: &str) -> String {
    format!("{user_id}/")
}

/// A validated object key of the form `{user_id}/{epoch_millis}-{file_name}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Build a key for an upload by `user_id` at `epoch_millis`.
    pub fn for_upload(
        user_id: &str,
        epoch_millis: i64,
        file_name: &str,
    ) -> Result<Self, StorageError> {
        if user_id.is_empty() || user_id.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "user id {user_id:?} cannot be used as a key prefix"
            )));
        }
        if file_name.is_empty() || file_name.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "file name {file_name:?} must be non-empty and contain no '/'"
            )));
        }

        Ok(Self(format!(
            "{}{epoch_millis}-{file_name}",
            user_prefix(user_id)
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
