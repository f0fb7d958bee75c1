//! Certiq Engine - document query engine
//!
//! Resolves a criteria tree against a document graph:
//! - [`GraphResolver`] supplies documents and their connections
//! - [`Traverser`] walks connections depth-first in declaration order
//! - [`DocumentQueryService`] is the `load(root_key, criteria, context)`
//!   surface consumed by rule processors

pub mod connections;
pub mod resolver;
pub mod result;
pub mod service;
pub mod store_resolver;
pub mod traverser;

pub use resolver::{Connection, ConnectionKind, GraphResolver};
pub use result::{MatchedCriterion, QueryIterator, QueryResult, VisitedNode};
pub use service::{DocumentQueryService, StoreQueryService};
pub use store_resolver::StoreResolver;
pub use traverser::Traverser;
