use certiq_core::errors::{ExError, ExErrorKind, QueryError};

#[test]
fn test_not_found_verifiable_by_kind() {
    let err = QueryError::NotFound {
        key: "documents/missing".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.entity_id(), Some("documents/missing"));
}

#[test]
fn test_invalid_document_distinct_from_not_found() {
    let err = QueryError::InvalidDocument {
        key: "documents/bad".to_string(),
        reason: "missing field `externalEvents`".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidDocument);
    assert_ne!(ex_err.kind(), ExErrorKind::NotFound);
    assert!(ex_err.message().contains("externalEvents"));
}

#[test]
fn test_connection_error_displays_both_ends() {
    let err = QueryError::NotFound {
        key: "documents/x".to_string(),
    }
    .in_connection("documents/x", "documents/root", "relatedDocument");

    let ex_err: ExError = err.into();
    let text = ex_err.to_string();

    assert!(text.starts_with("[ERR_CONNECTION_BROKEN]"));
    assert!(text.contains("documents/root"));
    assert!(text.contains("(key: documents/x)"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::InvalidDocument, "ERR_INVALID_DOCUMENT"),
        (ExErrorKind::ConnectionBroken, "ERR_CONNECTION_BROKEN"),
        (ExErrorKind::CycleDetected, "ERR_CYCLE_DETECTED"),
        (ExErrorKind::DepthExceeded, "ERR_DEPTH_EXCEEDED"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_keyless_errors() {
    let err = QueryError::Config {
        message: "fan_out must be at least 1".to_string(),
    };
    assert_eq!(err.key(), None);
    assert_eq!(err.root_cause(), &err);
}
