//! # Key-Value Storage
//!
//! The persistence seam behind `ListStore`. A provider stores opaque strings
//! under string keys; serialization is the caller's job.
//!
//! ```text
//! ListStore ──get/set──▶ dyn KeyValueStore
//!                          ├── FileStore    (one JSON file per key)
//!                          └── MemoryStore  (HashMap, nothing persisted)
//! ```
//!
//! Each call is atomic on its own. There are no transactions spanning keys.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;

use async_trait::async_trait;

/// Key holding the serialized entry collection.
pub const ENTRIES_KEY: &str = "@todos";
/// Key holding the serialized active-list flag.
pub const ACTIVE_LIST_KEY: &str = "@menus";

/// Errors a storage provider can report.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying filesystem failure.
    Io(std::io::Error),
    /// The provider cannot serve requests (closed, misconfigured).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Read the value under `key`. `Ok(None)` when nothing has been stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
