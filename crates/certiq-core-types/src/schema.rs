//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across the query engine,
//! the store and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Document identifiers
pub const FIELD_DOCUMENT_KEY: &str = "document_key";
pub const FIELD_ROOT_KEY: &str = "root_key";
pub const FIELD_CACHE_KEY: &str = "cache_key";

// Collection sizes
pub const FIELD_VISITED: &str = "visited";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_document_fields_are_distinct() {
        assert_ne!(FIELD_DOCUMENT_KEY, FIELD_ROOT_KEY);
        assert_ne!(FIELD_DOCUMENT_KEY, FIELD_CACHE_KEY);
    }
}
