//! Resolver for the document store's relationship model
//!
//! Connections come from `parentDocumentId` and event references; keys are
//! built with the store's [`KeyScheme`].

use async_trait::async_trait;
use certiq_core::{Criteria, Document, Result};
use certiq_store::{DocumentFetcher, KeyScheme};

use crate::connections::resolve_connections;
use crate::resolver::{Connection, GraphResolver};

pub struct StoreResolver<F> {
    fetcher: F,
    keys: KeyScheme,
}

impl<F: DocumentFetcher> StoreResolver<F> {
    pub fn new(fetcher: F, keys: KeyScheme) -> Self {
        Self { fetcher, keys }
    }

    pub fn keys(&self) -> &KeyScheme {
        &self.keys
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

#[async_trait]
impl<F: DocumentFetcher> GraphResolver for StoreResolver<F> {
    fn connections<'c>(&self, criteria: &'c Criteria, document: &Document) -> Vec<Connection<'c>> {
        resolve_connections(criteria, document, |id| self.keys.key_for(id))
    }

    async fn fetch(&self, key: &str) -> Result<Document> {
        self.fetcher.fetch(key).await
    }
}
