//! Stored document types
//!
//! Documents are owned by the backing store; the engine only reads them.
//! The wire format is camelCase JSON, unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, Result};

/// Pointer from an event to another document, optionally classified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl DocumentReference {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: Some(document_id.into()),
            ..Self::default()
        }
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

    /// The target id, if the reference can be followed
    ///
    /// A reference without a non-empty `documentId` is never traversed.
    pub fn target_id(&self) -> Option<&str> {
        self.document_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Record on a document that may point at another document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_document: Option<DocumentReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_document: Option<DocumentReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl DocumentEvent {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_related(mut self, reference: DocumentReference) -> Self {
        self.related_document = Some(reference);
        self
    }

    pub fn with_referenced(mut self, reference: DocumentReference) -> Self {
        self.referenced_document = Some(reference);
        self
    }

    /// The reference this event contributes to traversal
    ///
    /// `relatedDocument` wins over `referencedDocument` when both are set.
    pub fn reference(&self) -> Option<&DocumentReference> {
        self.related_document
            .as_ref()
            .or(self.referenced_document.as_ref())
    }
}

/// A node in the document graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub external_events: Vec<DocumentEvent>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_document_id: None,
            category: None,
            document_type: None,
            subtype: None,
            external_events: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_document_id: impl Into<String>) -> Self {
        self.parent_document_id = Some(parent_document_id.into());
        self
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

    pub fn with_event(mut self, event: DocumentEvent) -> Self {
        self.external_events.push(event);
        self
    }

    /// Parse and validate a raw payload fetched under `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` if the payload is not JSON, does not match
    /// the document schema, or fails [`Document::validate`].
    pub fn from_json(key: &str, bytes: &[u8]) -> Result<Self> {
        let document: Document =
            serde_json::from_slice(bytes).map_err(|e| QueryError::InvalidDocument {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        document.validate(key)?;
        Ok(document)
    }

    /// Check the constraints serde cannot express
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` when `id` is blank.
    pub fn validate(&self, key: &str) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(QueryError::InvalidDocument {
                key: key.to_string(),
                reason: "document id cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Parent id, if present and non-empty
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_document_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    /// Serialize back to the wire format
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
