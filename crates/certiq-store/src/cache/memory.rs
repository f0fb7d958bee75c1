use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use certiq_core::QueryError;

use super::Cache;
use crate::errors::Result;

/// Process-local cache, mainly for tests and short-lived embeddings
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cache_key: &str) -> bool {
        self.entries
            .read()
            .map(|e| e.contains_key(cache_key))
            .unwrap_or(false)
    }
}

fn poisoned() -> QueryError {
    QueryError::Internal {
        message: "memory cache lock poisoned".to_string(),
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(cache_key).cloned())
    }

    async fn set(&self, cache_key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(cache_key.to_string(), value.to_vec());
        Ok(())
    }
}
