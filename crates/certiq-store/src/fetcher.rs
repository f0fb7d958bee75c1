//! Validating document fetch
//!
//! Every document that reaches the traversal went through a
//! [`DocumentFetcher`], so invalid payloads never enter a result.

use std::sync::Arc;

use async_trait::async_trait;
use certiq_core::Document;

use crate::errors::{not_found, Result};
use crate::object_store::ObjectStore;

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch and validate the document stored under `key`
    ///
    /// # Errors
    ///
    /// * `NotFound` - nothing is stored under `key`
    /// * `InvalidDocument` - the payload does not conform to the schema
    /// * `Io` / `InvalidKey` - the backing store failed
    async fn fetch(&self, key: &str) -> Result<Document>;
}

#[async_trait]
impl<T: DocumentFetcher + ?Sized> DocumentFetcher for Arc<T> {
    async fn fetch(&self, key: &str) -> Result<Document> {
        (**self).fetch(key).await
    }
}

/// Fetcher that reads raw payloads from an [`ObjectStore`]
pub struct StoreFetcher<S> {
    store: S,
}

impl<S: ObjectStore> StoreFetcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: ObjectStore> DocumentFetcher for StoreFetcher<S> {
    async fn fetch(&self, key: &str) -> Result<Document> {
        let bytes = self.store.get(key).await?.ok_or_else(|| not_found(key))?;
        let document = Document::from_json(key, &bytes)?;
        tracing::debug!(document_key = key, document_id = %document.id, "fetched document");
        Ok(document)
    }
}
