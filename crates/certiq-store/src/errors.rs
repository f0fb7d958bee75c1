//! Error helpers for certiq-store
//!
//! Store failures are reported as `QueryError` so they flow through the
//! traversal unchanged.

use certiq_core::errors::QueryError;

pub use certiq_core::errors::Result;

/// Create a not-found error for a store key
pub fn not_found(key: &str) -> QueryError {
    QueryError::NotFound {
        key: key.to_string(),
    }
}

/// Create an invalid-key error
pub fn invalid_key(key: &str, reason: &str) -> QueryError {
    QueryError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> QueryError {
    QueryError::Io {
        op: operation.to_string(),
        message: err.to_string(),
    }
}
