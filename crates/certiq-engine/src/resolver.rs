//! Graph resolution interface
//!
//! The traverser only knows how to walk; what a connection is and where a
//! document comes from is decided by a [`GraphResolver`].

use std::sync::Arc;

use async_trait::async_trait;
use certiq_core::{Criteria, Criterion, Document, Result};

use crate::result::MatchedCriterion;

/// Which part of the criteria tree produced a connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionKind<'c> {
    /// `parentDocument`, continuing with the nested criteria
    Parent(&'c Criteria),
    /// A `relatedDocuments` entry that matched an event reference
    Related(&'c Criterion),
}

/// A resolved (target key, nested criteria) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Connection<'c> {
    pub key: String,
    pub kind: ConnectionKind<'c>,
}

impl<'c> Connection<'c> {
    pub fn parent(key: impl Into<String>, criteria: &'c Criteria) -> Self {
        Self {
            key: key.into(),
            kind: ConnectionKind::Parent(criteria),
        }
    }

    pub fn related(key: impl Into<String>, criterion: &'c Criterion) -> Self {
        Self {
            key: key.into(),
            kind: ConnectionKind::Related(criterion),
        }
    }

    /// Criteria to apply at the target document
    pub fn criteria(&self) -> &'c Criteria {
        match self.kind {
            ConnectionKind::Parent(criteria) => criteria,
            ConnectionKind::Related(criterion) => &criterion.criteria,
        }
    }

    /// Whether the target document is left out of the result
    pub fn omit(&self) -> bool {
        match self.kind {
            ConnectionKind::Parent(_) => false,
            ConnectionKind::Related(criterion) => criterion.omit,
        }
    }

    /// Relationship name used in errors and logs
    pub fn via(&self) -> &'static str {
        match self.kind {
            ConnectionKind::Parent(_) => "parentDocument",
            ConnectionKind::Related(_) => "relatedDocument",
        }
    }

    pub fn matched(&self) -> MatchedCriterion {
        match self.kind {
            ConnectionKind::Parent(_) => MatchedCriterion::ParentDocument,
            ConnectionKind::Related(criterion) => {
                MatchedCriterion::RelatedDocument(criterion.spec.clone())
            }
        }
    }
}

#[async_trait]
pub trait GraphResolver: Send + Sync {
    /// Connections of `document` under `criteria`, in traversal order
    fn connections<'c>(&self, criteria: &'c Criteria, document: &Document) -> Vec<Connection<'c>>;

    /// Fetch and validate the document stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidDocument` (or a store failure) for `key`.
    async fn fetch(&self, key: &str) -> Result<Document>;
}

#[async_trait]
impl<T: GraphResolver + ?Sized> GraphResolver for Arc<T> {
    fn connections<'c>(&self, criteria: &'c Criteria, document: &Document) -> Vec<Connection<'c>> {
        (**self).connections(criteria, document)
    }

    async fn fetch(&self, key: &str) -> Result<Document> {
        (**self).fetch(key).await
    }
}
