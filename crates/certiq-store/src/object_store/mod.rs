//! Raw object stores
//!
//! An object store maps an opaque key to the bytes stored under it. It does
//! not parse or validate anything; that is the fetcher's job.

mod fs;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bytes stored under `key`, or `None` when the key is absent
    ///
    /// # Errors
    ///
    /// Returns an error only when the store itself fails (IO, bad key);
    /// absence is not an error at this level.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stable identity of the data behind this store, if it has one
    ///
    /// Persistent caches are partitioned by it. Stores returning `None` are
    /// never put behind a persistent cache.
    fn scope(&self) -> Option<String> {
        None
    }
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    fn scope(&self) -> Option<String> {
        (**self).scope()
    }
}
