//! Connection discovery for stored documents
//!
//! The predicate is [`certiq_core::matches`]; this module owns the scan over
//! a document's events and the declaration-order policy.

use certiq_core::{matches, Criteria, Criterion, Document, DocumentReference};

use crate::resolver::Connection;

/// Event references on `document` that satisfy `criterion`, in event order
///
/// Only traversable references (non-empty `documentId`) are returned.
pub fn matching_references<'d>(
    criterion: &'d Criterion,
    document: &'d Document,
) -> impl Iterator<Item = &'d DocumentReference> + 'd {
    document
        .external_events
        .iter()
        .filter_map(|event| event.reference())
        .filter(|reference| reference.target_id().is_some())
        .filter(move |reference| matches(&criterion.spec, reference))
}

/// All connections of `document` under `criteria`
///
/// Parent first, then one connection per matching event for each
/// `relatedDocuments` entry, entries in declaration order.
pub fn resolve_connections<'c, K>(
    criteria: &'c Criteria,
    document: &Document,
    key_for: K,
) -> Vec<Connection<'c>>
where
    K: Fn(&str) -> String,
{
    let mut connections = Vec::new();

    if let (Some(parent_criteria), Some(parent_id)) =
        (criteria.parent_document.as_deref(), document.parent_id())
    {
        connections.push(Connection::parent(key_for(parent_id), parent_criteria));
    }

    for criterion in &criteria.related_documents {
        for reference in matching_references(criterion, document) {
            if let Some(target) = reference.target_id() {
                connections.push(Connection::related(key_for(target), criterion));
            }
        }
    }

    connections
}
