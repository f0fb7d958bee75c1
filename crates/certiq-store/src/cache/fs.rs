//! Filesystem cache: one `<cache_key>.json` file per entry

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::atomic::atomic_write;
use super::Cache;
use crate::errors::{invalid_key, io_error, Result};

pub struct FsCache {
    dir: PathBuf,
}

impl FsCache {
    /// The directory is created lazily on the first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, cache_key: &str) -> Result<PathBuf> {
        if cache_key.is_empty() || !cache_key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_key(cache_key, "cache key must be a hex digest"));
        }
        Ok(self.dir.join(format!("{}.json", cache_key)))
    }
}

#[async_trait]
impl Cache for FsCache {
    async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(cache_key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read_cache", e)),
        }
    }

    async fn set(&self, cache_key: &str, value: &[u8]) -> Result<()> {
        let path = self.entry_path(cache_key)?;
        atomic_write(&path, value).await
    }
}
