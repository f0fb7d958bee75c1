//! Correlation ids
//!
//! A `RequestContext` travels with every query so that log events and
//! errors raised deep inside a traversal can be tied back to the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh time-ordered id (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wrap an id minted elsewhere, e.g. by the invoker of a query
            pub fn from_string(s: String) -> Self {
                Self(s)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifies one `load` call
    RequestId
);

correlation_id!(
    /// Identifies a caller-side trace spanning several queries
    TraceId
);

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_ref().map(TraceId::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_contexts_differ() {
        let a = RequestContext::new();
        let b = RequestContext::new();

        assert_ne!(a.request_id, b.request_id);
        assert!(a.trace_id().is_none());
    }

    #[test]
    fn test_external_id_is_kept_verbatim() {
        let ctx = RequestContext::with_request_id(RequestId::from_string("req-1".to_string()))
            .with_trace_id(TraceId::from_string("trace-9".to_string()));

        assert_eq!(ctx.request_id.to_string(), "req-1");
        assert_eq!(ctx.trace_id(), Some("trace-9"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = RequestId::from_string("req-1".to_string());

        assert_eq!(serde_json::to_string(&id).unwrap(), r#""req-1""#);
        let back: RequestId = serde_json::from_str(r#""req-1""#).unwrap();
        assert_eq!(back, id);
    }
}
