//! Caching decorator for document fetchers
//!
//! A hit returns the cached document without touching the delegate. A miss
//! calls the delegate and then tries to persist the result. Cache failures
//! in either direction are logged and otherwise ignored: the cache can make
//! a fetch faster, never different.

use async_trait::async_trait;
use certiq_core::Document;

use crate::cache::{cache_key, Cache};
use crate::errors::Result;
use crate::fetcher::DocumentFetcher;

pub struct CachedFetcher<F, C> {
    inner: F,
    cache: C,
}

impl<F: DocumentFetcher, C: Cache> CachedFetcher<F, C> {
    pub fn new(inner: F, cache: C) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    async fn lookup(&self, key: &str, cache_key: &str) -> Option<Document> {
        let bytes = match self.cache.get(cache_key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(
                    document_key = key,
                    cache_key = cache_key,
                    error = %err,
                    "cache read failed, treating as miss"
                );
                return None;
            }
        };

        // Entries are re-validated; a corrupt entry must not leak into a result
        match Document::from_json(key, &bytes) {
            Ok(document) => Some(document),
            Err(err) => {
                tracing::warn!(
                    document_key = key,
                    cache_key = cache_key,
                    error = %err,
                    "discarding invalid cache entry"
                );
                None
            }
        }
    }

    async fn persist(&self, key: &str, cache_key: &str, document: &Document) {
        let bytes = match document.to_json() {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(document_key = key, error = %err, "cannot encode document for cache");
                return;
            }
        };

        if let Err(err) = self.cache.set(cache_key, &bytes).await {
            tracing::warn!(
                document_key = key,
                cache_key = cache_key,
                error = %err,
                "cache write failed"
            );
        }
    }
}

#[async_trait]
impl<F: DocumentFetcher, C: Cache> DocumentFetcher for CachedFetcher<F, C> {
    async fn fetch(&self, key: &str) -> Result<Document> {
        let cache_key = cache_key(key);

        if let Some(document) = self.lookup(key, &cache_key).await {
            tracing::debug!(document_key = key, "cache hit");
            return Ok(document);
        }

        tracing::debug!(document_key = key, "cache miss");
        let document = self.inner.fetch(key).await?;
        self.persist(key, &cache_key, &document).await;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::fetcher::StoreFetcher;
    use crate::object_store::MemoryObjectStore;

    #[tokio::test]
    async fn test_corrupt_entry_falls_back_to_delegate() {
        let store = MemoryObjectStore::new();
        store.insert("documents/a", br#"{"id":"a","externalEvents":[]}"#.to_vec());

        let cache = MemoryCache::new();
        cache.set(&cache_key("documents/a"), b"not json").await.unwrap();

        let fetcher = CachedFetcher::new(StoreFetcher::new(store), cache);
        let doc = fetcher.fetch("documents/a").await.unwrap();

        assert_eq!(doc.id, "a");
        let repaired = fetcher.cache().get(&cache_key("documents/a")).await.unwrap();
        assert_eq!(
            Document::from_json("documents/a", &repaired.unwrap()).unwrap(),
            doc
        );
    }

    #[tokio::test]
    async fn test_delegate_errors_are_not_cached() {
        let fetcher = CachedFetcher::new(StoreFetcher::new(MemoryObjectStore::new()), MemoryCache::new());

        assert!(fetcher.fetch("documents/none").await.is_err());
        assert!(fetcher.cache().is_empty());
    }
}
