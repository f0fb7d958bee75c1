//! In-memory object store

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use certiq_core::Document;

use super::ObjectStore;
use crate::errors::Result;

/// HashMap-backed store, used for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `key`, replacing any previous value
    pub fn insert(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), bytes.into());
    }

    /// Store a document serialized in the wire format
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the document cannot be encoded.
    pub fn insert_document(&self, key: impl Into<String>, document: &Document) -> Result<()> {
        let bytes = document.to_json()?;
        self.insert(key, bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        Ok(objects.get(key).cloned())
    }
}
