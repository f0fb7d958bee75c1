//! Document key construction
//!
//! The engine treats keys as opaque strings; this is the one place that
//! knows how a document id becomes a store key.

/// Builds store keys from a fixed prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyScheme {
    prefix: String,
}

impl KeyScheme {
    /// Trailing slashes on `prefix` are ignored
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `"<prefix>/<document_id>"`, or the bare id for an empty prefix
    pub fn key_for(&self, document_id: &str) -> String {
        if self.prefix.is_empty() {
            document_id.to_string()
        } else {
            format!("{}/{}", self.prefix, document_id)
        }
    }
}
