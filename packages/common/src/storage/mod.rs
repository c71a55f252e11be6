mod error;
mod key;
mod traits;

pub mod memory;
#[cfg(feature = "object-storage")]
pub mod s3;

pub use error::StorageError;
pub use key::{ObjectKey, user_prefix};
pub use traits::ObjectStore;
