//! Certiq Core - document model and query primitives
//!
//! This crate provides the pieces of the document query engine that do not
//! touch storage:
//! - Document, event and reference types with schema validation
//! - The declarative criteria tree and the reference matcher
//! - Query configuration
//! - The canonical error facility and structured logging facility

pub mod config;
pub mod criteria;
pub mod errors;
pub mod logging_facility;
pub mod matcher;
pub mod model;

pub use certiq_core_types as types;

pub use config::{CacheConfig, CyclePolicy, QueryConfig};
pub use criteria::{Criteria, Criterion, MatchSpec};
pub use errors::{ExError, ExErrorKind, QueryError, Result};
pub use matcher::matches;
pub use model::{Document, DocumentEvent, DocumentReference};
