//! Certiq Store - read access to stored documents
//!
//! Provides:
//! - Key construction from a prefix and a document id
//! - Raw object stores (filesystem and in-memory)
//! - A validating document fetcher over any object store
//! - A lookaside cache decorator with filesystem and in-memory caches

pub mod cache;
pub mod cached_fetcher;
pub mod errors;
pub mod fetcher;
pub mod keys;
pub mod object_store;

pub use cache::{cache_key, Cache, FsCache, MemoryCache};
pub use cached_fetcher::CachedFetcher;
pub use fetcher::{DocumentFetcher, StoreFetcher};
pub use keys::KeyScheme;
pub use object_store::{FsObjectStore, MemoryObjectStore, ObjectStore};

// Re-export key types
pub use errors::Result;
