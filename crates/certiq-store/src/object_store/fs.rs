//! Filesystem object store
//!
//! Key `a/b/c` is stored at `<root>/a/b/c.json`.

use std::path::PathBuf;

use async_trait::async_trait;

use super::ObjectStore;
use crate::errors::{invalid_key, io_error, Result};

pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Map a key onto a path below the root
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for empty, absolute or escaping keys.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(invalid_key(key, "key is empty"));
        }
        if key.starts_with('/') || key.contains('\\') {
            return Err(invalid_key(key, "key must be a relative '/'-separated path"));
        }

        let segments: Vec<&str> = key.split('/').collect();
        if segments
            .iter()
            .any(|s| s.is_empty() || *s == "." || *s == "..")
        {
            return Err(invalid_key(key, "key contains an empty or relative segment"));
        }

        let mut path = self.root.clone();
        if let Some((last, dirs)) = segments.split_last() {
            path.extend(dirs);
            path.push(format!("{}.json", last));
        }
        Ok(path)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read_object", e)),
        }
    }

    fn scope(&self) -> Option<String> {
        let root = std::fs::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone());
        Some(format!("fs:{}", root.display()))
    }
}
