//! Query results
//!
//! A [`QueryResult`] holds the documents a traversal emitted, already in
//! traversal order. Draining it never performs I/O: every fetch happened
//! inside `load`, so a result only exists for a query that fully succeeded.

use std::future::Future;

use certiq_core::types::RequestId;
use certiq_core::{Document, MatchSpec};
use serde::Serialize;

/// How an emitted document was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "via", rename_all = "camelCase")]
pub enum MatchedCriterion {
    /// The query's root document
    Root,
    /// Followed `parentDocumentId`
    ParentDocument,
    /// Matched a `relatedDocuments` entry with this spec
    RelatedDocument(MatchSpec),
}

/// One emitted document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitedNode {
    pub key: String,
    pub depth: usize,
    pub matched_criterion: MatchedCriterion,
    pub document: Document,
}

impl VisitedNode {
    pub fn is_root(&self) -> bool {
        self.matched_criterion == MatchedCriterion::Root
    }
}

#[derive(Debug, Clone)]
pub struct QueryResult {
    root_key: String,
    request_id: RequestId,
    nodes: Vec<VisitedNode>,
}

impl QueryResult {
    pub fn new(root_key: impl Into<String>, request_id: RequestId, nodes: Vec<VisitedNode>) -> Self {
        Self {
            root_key: root_key.into(),
            request_id,
            nodes,
        }
    }

    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn iterator(&self) -> QueryIterator<'_> {
        QueryIterator { nodes: &self.nodes }
    }

    pub fn nodes(&self) -> &[VisitedNode] {
        &self.nodes
    }

    /// Emitted documents in traversal order
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.nodes.iter().map(|n| &n.document)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<VisitedNode> {
        self.nodes
    }
}

impl IntoIterator for QueryResult {
    type Item = VisitedNode;
    type IntoIter = std::vec::IntoIter<VisitedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a VisitedNode;
    type IntoIter = std::slice::Iter<'a, VisitedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Visitor surface over a result, in traversal order
#[derive(Debug, Clone, Copy)]
pub struct QueryIterator<'a> {
    nodes: &'a [VisitedNode],
}

impl<'a> QueryIterator<'a> {
    /// Call `visitor` once per node, awaiting each call before the next
    pub async fn each<F, Fut>(self, mut visitor: F)
    where
        F: FnMut(&'a VisitedNode) -> Fut,
        Fut: Future<Output = ()>,
    {
        for node in self.nodes {
            visitor(node).await;
        }
    }

    /// Like [`each`](Self::each), stopping at the first visitor error
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `visitor`.
    pub async fn try_each<F, Fut, E>(self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&'a VisitedNode) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        for node in self.nodes {
            visitor(node).await?;
        }
        Ok(())
    }

    /// Collect `transform(node)` for every node, preserving order
    pub fn map<T, F>(self, transform: F) -> Vec<T>
    where
        F: FnMut(&'a VisitedNode) -> T,
    {
        self.nodes.iter().map(transform).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
