//! Key-value persistence for roster records
//!
//! Every record is a single JSON document under a fixed key. Backends:
//! - [`MemoryKvStore`]: process-local, used by tests and `backend = "memory"`
//! - [`FileKvStore`]: one `<key>.json` file per record inside a directory
//!
//! [`records`] holds the typed load/save helpers the repositories build on.

pub mod file;
pub mod memory;
pub mod records;

use std::sync::Arc;

use roster_domain::{Result, StorageBackend, StorageConfig};
use serde_json::Value;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

/// Minimal document store the repositories are written against.
pub trait KvStore: Send + Sync {
    /// Stored document for `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the document stored under `key`.
    fn put(&self, key: &str, value: &Value) -> Result<()>;

    /// Drop `key`; removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Open the backend named in configuration.
///
/// # Errors
/// Returns `RosterError::Storage` if the file backend cannot create its
/// directory.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KvStore>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryKvStore::new())),
        StorageBackend::File => Ok(Arc::new(FileKvStore::open(&config.path)?)),
    }
}
