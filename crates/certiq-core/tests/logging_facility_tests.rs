use certiq_core::logging_facility::test_capture::init_test_capture;
use certiq_core::types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_OP, FIELD_ROOT_KEY, FIELD_VISITED,
};
use certiq_core::{log_op_end, log_op_error, log_op_start, QueryError};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, root_key = "documents/r1");

    capture.assert_event_exists(op_name, EVENT_START);
    let events = capture.with_field(FIELD_OP, op_name);
    assert_eq!(events[0].field(FIELD_ROOT_KEY), Some("documents/r1"));
    assert!(events[0]
        .field(FIELD_COMPONENT)
        .is_some_and(|c| c.starts_with("logging_facility_tests")));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, visited = 3);

    let end_events: Vec<_> = capture
        .with_field(FIELD_OP, op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1);
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(end_events[0].field(FIELD_VISITED), Some("3"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = QueryError::NotFound {
        key: "documents/x".to_string(),
    };
    log_op_error!(op_name, &err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .with_field(FIELD_OP, op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1);
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].field(FIELD_ERR_KIND), Some("NotFound"));
    assert_eq!(error_events[0].level, tracing::Level::ERROR);
}
