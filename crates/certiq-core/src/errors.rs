use certiq_core_types::{RequestContext, RequestId, TraceId};
use thiserror::Error;

/// Result type alias using QueryError
pub type Result<T> = std::result::Result<T, QueryError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by log events, the CLI and
/// rule processors that need to tell a broken link from a malformed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidConfig,

    // Documents
    NotFound,
    InvalidDocument,

    // Traversal
    ConnectionBroken,
    CycleDetected,
    DepthExceeded,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::ConnectionBroken => "ERR_CONNECTION_BROKEN",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::DepthExceeded => "ERR_DEPTH_EXCEEDED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// correlation ids of the query that failed.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (for documents this is the store key)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach both correlation ids of a request context
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.request_id = Some(ctx.request_id.clone());
        self.trace_id = ctx.trace_id.clone();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (key: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for document queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    // ===== Document Errors =====
    /// No stored payload exists for the key
    #[error("Document not found: {key}")]
    NotFound { key: String },

    /// The stored payload does not conform to the document schema
    #[error("Invalid document {key}: {reason}")]
    InvalidDocument { key: String, reason: String },

    /// The key cannot be mapped onto the backing store
    #[error("Invalid document key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    // ===== Traversal Errors =====
    /// A connection discovered on `from` could not be resolved
    #[error("Failed to resolve {via} connection {from} -> {key}: {source}")]
    ConnectionResolution {
        key: String,
        from: String,
        via: String,
        source: Box<QueryError>,
    },

    /// The key is already on the current traversal branch
    #[error("Cycle detected: {key} is already on the traversal path {path:?}")]
    CycleDetected { key: String, path: Vec<String> },

    /// Recursion went deeper than the configured limit
    #[error("Traversal depth limit {max_depth} exceeded at {key}")]
    DepthExceeded { key: String, max_depth: usize },

    // ===== Generic Errors =====
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error during {op}: {message}")]
    Io { op: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QueryError {
    /// Wrap an error raised while resolving a connection.
    ///
    /// Only the innermost connection is recorded: an error that already
    /// carries connection context is returned unchanged.
    pub fn in_connection(
        self,
        key: impl Into<String>,
        from: impl Into<String>,
        via: impl Into<String>,
    ) -> Self {
        match self {
            QueryError::ConnectionResolution { .. } => self,
            other => QueryError::ConnectionResolution {
                key: key.into(),
                from: from.into(),
                via: via.into(),
                source: Box::new(other),
            },
        }
    }

    /// Strip connection wrappers and return the underlying failure
    pub fn root_cause(&self) -> &QueryError {
        match self {
            QueryError::ConnectionResolution { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The document key the failure is about, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            QueryError::NotFound { key }
            | QueryError::InvalidDocument { key, .. }
            | QueryError::InvalidKey { key, .. }
            | QueryError::ConnectionResolution { key, .. }
            | QueryError::CycleDetected { key, .. }
            | QueryError::DepthExceeded { key, .. } => Some(key),
            QueryError::Config { .. }
            | QueryError::Io { .. }
            | QueryError::Serialization { .. }
            | QueryError::Internal { .. } => None,
        }
    }

    pub fn kind(&self) -> ExErrorKind {
        match self {
            QueryError::NotFound { .. } => ExErrorKind::NotFound,
            QueryError::InvalidDocument { .. } => ExErrorKind::InvalidDocument,
            QueryError::InvalidKey { .. } => ExErrorKind::InvalidInput,
            QueryError::ConnectionResolution { .. } => ExErrorKind::ConnectionBroken,
            QueryError::CycleDetected { .. } => ExErrorKind::CycleDetected,
            QueryError::DepthExceeded { .. } => ExErrorKind::DepthExceeded,
            QueryError::Config { .. } => ExErrorKind::InvalidConfig,
            QueryError::Io { .. } => ExErrorKind::Io,
            QueryError::Serialization { .. } => ExErrorKind::Serialization,
            QueryError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from QueryError to ExError
///
/// Connection wrappers become an ExError chain so the root cause code stays
/// reachable through `source_error()`.
impl From<QueryError> for ExError {
    fn from(err: QueryError) -> Self {
        let kind = err.kind();
        match err {
            QueryError::NotFound { key } => ExError::new(kind)
                .with_op("fetch_document")
                .with_entity_id(key)
                .with_message("Document not found"),

            QueryError::InvalidDocument { key, reason } => ExError::new(kind)
                .with_op("validate_document")
                .with_entity_id(key)
                .with_message(reason),

            QueryError::InvalidKey { key, reason } => ExError::new(kind)
                .with_op("resolve_key")
                .with_entity_id(key)
                .with_message(reason),

            QueryError::ConnectionResolution {
                key,
                from,
                via,
                source,
            } => ExError::new(kind)
                .with_op("resolve_connection")
                .with_entity_id(key)
                .with_message(format!("{} connection from {} is broken", via, from))
                .with_source(ExError::from(*source)),

            QueryError::CycleDetected { key, path } => ExError::new(kind)
                .with_op("resolve_connection")
                .with_entity_id(key)
                .with_message(format!("Already on traversal path {}", path.join(" -> "))),

            QueryError::DepthExceeded { key, max_depth } => ExError::new(kind)
                .with_op("resolve_connection")
                .with_entity_id(key)
                .with_message(format!("Depth limit {} exceeded", max_depth)),

            QueryError::Config { message } => ExError::new(kind)
                .with_op("load_config")
                .with_message(message),

            QueryError::Io { op, message } => ExError::new(kind).with_op(op).with_message(message),

            QueryError::Serialization { message } | QueryError::Internal { message } => {
                ExError::new(kind).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_connection_wraps_once() {
        let err = QueryError::NotFound {
            key: "docs/x".to_string(),
        };

        let inner = err.in_connection("docs/x", "docs/r", "relatedDocument");
        let outer = inner
            .clone()
            .in_connection("docs/r", "docs/root", "parentDocument");

        assert_eq!(inner, outer);
        assert_eq!(outer.key(), Some("docs/x"));
    }

    #[test]
    fn test_root_cause_unwraps_connection() {
        let err = QueryError::InvalidDocument {
            key: "docs/x".to_string(),
            reason: "missing field `id`".to_string(),
        }
        .in_connection("docs/x", "docs/r", "relatedDocument");

        assert!(matches!(
            err.root_cause(),
            QueryError::InvalidDocument { .. }
        ));
        assert_eq!(err.kind(), ExErrorKind::ConnectionBroken);
    }

    #[test]
    fn test_display_names_key() {
        let err = QueryError::NotFound {
            key: "docs/missing".to_string(),
        }
        .in_connection("docs/missing", "docs/root", "relatedDocument");

        let text = err.to_string();
        assert!(text.contains("docs/missing"));
        assert!(text.contains("docs/root"));
    }

    #[test]
    fn test_ex_error_chain_keeps_root_code() {
        let err = QueryError::NotFound {
            key: "docs/x".to_string(),
        }
        .in_connection("docs/x", "docs/r", "relatedDocument");

        let ex: ExError = err.into();

        assert_eq!(ex.code(), "ERR_CONNECTION_BROKEN");
        assert_eq!(ex.entity_id(), Some("docs/x"));
        assert_eq!(ex.source_error().map(|s| s.code()), Some("ERR_NOT_FOUND"));
    }

    #[test]
    fn test_with_context_sets_correlation_ids() {
        let ctx = RequestContext::new().with_trace_id(TraceId::new());
        let ex = ExError::new(ExErrorKind::Internal).with_context(&ctx);

        assert_eq!(ex.request_id(), Some(&ctx.request_id));
        assert_eq!(ex.trace_id(), ctx.trace_id.as_ref());
    }
}
