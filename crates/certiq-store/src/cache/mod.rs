//! Lookaside cache storage
//!
//! Entries are addressed by [`cache_key`], the SHA-256 of the request key,
//! so distinct keys never share an entry.

mod atomic;
mod fs;
mod memory;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::errors::Result;

pub use fs::FsCache;
pub use memory::MemoryCache;

#[async_trait]
pub trait Cache: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be read.
    async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>>;

    /// # Errors
    ///
    /// Returns an error if the entry cannot be persisted.
    async fn set(&self, cache_key: &str, value: &[u8]) -> Result<()>;
}

/// Stable cache key for a request key: lowercase hex SHA-256
pub fn cache_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_sha256_hex() {
        let k = cache_key("documents/abc");

        assert_eq!(k.len(), 64);
        assert!(k.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cache_key_known_vector() {
        assert_eq!(
            cache_key("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_cache_key_stable_and_distinct() {
        assert_eq!(cache_key("a"), cache_key("a"));
        assert_ne!(cache_key("documents/a"), cache_key("documents/b"));
    }
}
