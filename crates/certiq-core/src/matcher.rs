//! Reference matching
//!
//! `matches` is the predicate used by connection resolution; the scan over a
//! document's events lives with the resolver.

use crate::criteria::MatchSpec;
use crate::model::DocumentReference;

/// Does `reference` satisfy every field `spec` defines?
///
/// Fields the spec leaves undefined never cause a mismatch. Comparison is
/// exact string equality, so case or punctuation differences do not match.
pub fn matches(spec: &MatchSpec, reference: &DocumentReference) -> bool {
    field_matches(spec.category.as_deref(), reference.category.as_deref())
        && field_matches(
            spec.document_type.as_deref(),
            reference.document_type.as_deref(),
        )
        && field_matches(spec.subtype.as_deref(), reference.subtype.as_deref())
}

fn field_matches(expected: Option<&str>, actual: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => actual == Some(expected),
    }
}
