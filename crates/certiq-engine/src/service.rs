//! Document query service
//!
//! `load` runs the whole traversal before returning, so every fetch error
//! surfaces here and a returned [`QueryResult`] is always complete.
//!
//! Logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success, with the number of emitted documents
//! - `log_op_error!` on failure

use std::sync::Arc;

use certiq_core::types::RequestContext;
use certiq_core::{log_op_end, log_op_error, log_op_start};
use certiq_core::{Criteria, QueryConfig, Result};
use certiq_store::{cache_key, CachedFetcher, DocumentFetcher, FsCache, KeyScheme, ObjectStore, StoreFetcher};

use crate::resolver::GraphResolver;
use crate::result::QueryResult;
use crate::store_resolver::StoreResolver;
use crate::traverser::Traverser;

pub struct DocumentQueryService<R> {
    traverser: Traverser<R>,
}

impl<R: GraphResolver> DocumentQueryService<R> {
    pub fn new(resolver: R, config: &QueryConfig) -> Self {
        Self {
            traverser: Traverser::new(resolver, config),
        }
    }

    pub fn resolver(&self) -> &R {
        self.traverser.resolver()
    }

    /// Resolve `criteria` starting at the document stored under `root_key`
    ///
    /// # Errors
    ///
    /// Returns the first failure met anywhere in the traversal: `NotFound` or
    /// `InvalidDocument` for the root itself, `ConnectionResolution` wrapping
    /// the cause for any connected document.
    pub async fn load(
        &self,
        root_key: &str,
        criteria: &Criteria,
        context: &RequestContext,
    ) -> Result<QueryResult> {
        log_op_start!(
            "load",
            root_key = root_key,
            request_id = %context.request_id,
            trace_id = context.trace_id().unwrap_or("")
        );
        let start = std::time::Instant::now();

        let nodes = self.traverser.traverse(root_key, criteria).await.map_err(|e| {
            log_op_error!(
                "load",
                &e,
                duration_ms = start.elapsed().as_millis() as u64,
                root_key = root_key,
                request_id = %context.request_id
            );
            e
        })?;

        log_op_end!(
            "load",
            duration_ms = start.elapsed().as_millis() as u64,
            root_key = root_key,
            visited = nodes.len(),
            request_id = %context.request_id
        );

        Ok(QueryResult::new(root_key, context.request_id.clone(), nodes))
    }
}

/// Service over an object store, optionally behind the filesystem cache
pub type StoreQueryService = DocumentQueryService<StoreResolver<Arc<dyn DocumentFetcher>>>;

impl StoreQueryService {
    /// Build the standard stack for `store` from `config`
    ///
    /// With the cache enabled, entries live under a subdirectory of
    /// `config.cache.dir` derived from [`ObjectStore::scope`], so stores
    /// sharing a cache directory never read each other's documents. A store
    /// without a scope is served uncached.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `config` fails validation.
    pub fn open<S: ObjectStore + 'static>(store: S, config: &QueryConfig) -> Result<Self> {
        config.validate()?;

        let fetcher: Arc<dyn DocumentFetcher> = match (config.cache.enabled, store.scope()) {
            (true, Some(scope)) => {
                let cache_dir = config.cache.dir.join(cache_key(&scope));
                tracing::debug!(store_scope = %scope, cache_dir = %cache_dir.display(), "document cache enabled");
                Arc::new(CachedFetcher::new(StoreFetcher::new(store), FsCache::new(cache_dir)))
            }
            (true, None) => {
                tracing::warn!("object store has no scope; document cache disabled");
                Arc::new(StoreFetcher::new(store))
            }
            (false, _) => Arc::new(StoreFetcher::new(store)),
        };

        let resolver = StoreResolver::new(fetcher, KeyScheme::new(config.key_prefix.clone()));
        Ok(Self::new(resolver, config))
    }

    /// Store key for a document id under this service's prefix
    pub fn key_for(&self, document_id: &str) -> String {
        self.resolver().keys().key_for(document_id)
    }
}
