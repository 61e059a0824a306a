//! Tests for the domain error payload, validation, and trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[case(ErrorCode::NotFound, "not found")]
#[case(ErrorCode::InternalError, REDACTED_MESSAGE)]
fn new_substitutes_blank_messages(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(Error::new(code, " \t").message(), expected);
}

#[rstest]
fn redaction_keeps_trace_but_drops_details(expected_trace_id: String) {
    let error = Error::internal("pool: password authentication failed")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "dsn": "postgres://secret" }));

    let redacted = error.redacted();
    assert_eq!(redacted.message(), REDACTED_MESSAGE);
    assert_eq!(redacted.trace_id(), Some(expected_trace_id.as_str()));
    assert!(redacted.details().is_none());
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn validation_errors_nest_messages_per_field() {
    let mut errors = FieldErrors::default();
    errors.push("username", "username must be at least 3 characters");
    errors.push("email", "email is already in use");

    let error = Error::validation(errors);

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({
            "errors": {
                "email": { "message": "email is already in use" },
                "username": { "message": "username must be at least 3 characters" },
            }
        }))
    );
}

#[rstest]
fn serialises_camel_case_and_omits_absent_fields(expected_trace_id: String) {
    let error = Error::not_found("missing").with_trace_id(expected_trace_id.clone());
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value["code"], json!("not_found"));
    assert_eq!(value["traceId"], json!(expected_trace_id));
    assert!(value.get("details").is_none());
}

#[rstest]
#[case(json!({ "code": "not_found", "message": "  " }))]
#[case(json!({ "code": "not_found", "message": "gone", "traceId": " " }))]
fn deserialisation_enforces_invariants(#[case] payload: serde_json::Value) {
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialisation_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({ "code": "forbidden", "message": "nope" });

    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
}
