//! Declarative query criteria
//!
//! A criteria tree says which relationships to follow from a root document
//! and how deep. It carries no behaviour; the traverser interprets it.
//!
//! ```
//! use certiq_core::{Criteria, Criterion};
//!
//! // root -> (omitted) audit -> certificate
//! let criteria = Criteria::new().with_related(
//!     Criterion::new()
//!         .with_category("Methodology")
//!         .omit()
//!         .with_related(Criterion::new().with_type("Certificate")),
//! );
//! assert_eq!(criteria.related_documents.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Partial classification of a document reference
///
/// A field left as `None` is a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl MatchSpec {
    /// A spec that matches every reference
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn is_wildcard(&self) -> bool {
        self.category.is_none() && self.document_type.is_none() && self.subtype.is_none()
    }
}

/// Relationships to follow from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_document: Option<Box<Criteria>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_documents: Vec<Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow `parentDocumentId` and continue with `criteria` there
    pub fn with_parent(mut self, criteria: Criteria) -> Self {
        self.parent_document = Some(Box::new(criteria));
        self
    }

    /// Follow every event reference matching `criterion`
    pub fn with_related(mut self, criterion: Criterion) -> Self {
        self.related_documents.push(criterion);
        self
    }

    /// True when no relationship is followed from here
    pub fn is_leaf(&self) -> bool {
        self.parent_document.is_none() && self.related_documents.is_empty()
    }
}

/// One related-document entry of a criteria tree
///
/// `omit` routes through the matched document without emitting it; the
/// nested criteria are still evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    #[serde(flatten)]
    pub spec: MatchSpec,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub omit: bool,
    #[serde(flatten)]
    pub criteria: Criteria,
}

impl Criterion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matching(spec: MatchSpec) -> Self {
        Self {
            spec,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.spec.category = Some(category.into());
        self
    }

    pub fn with_type(mut self, document_type: impl Into<String>) -> Self {
        self.spec.document_type = Some(document_type.into());
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.spec.subtype = Some(subtype.into());
        self
    }

    /// Route through matches without emitting them
    pub fn omit(mut self) -> Self {
        self.omit = true;
        self
    }

    pub fn with_parent(mut self, criteria: Criteria) -> Self {
        self.criteria.parent_document = Some(Box::new(criteria));
        self
    }

    pub fn with_related(mut self, criterion: Criterion) -> Self {
        self.criteria.related_documents.push(criterion);
        self
    }
}
