//! Tests for domain error construction and its wire representation.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
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
    let error = TraceId::scope(trace_id, async move { Error::conflict("taken") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_message_under_error_key() {
    let error = Error::conflict("code already claimed").with_trace_id("abc");
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "error": "code already claimed",
            "code": "conflict",
            "traceId": "abc",
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("code not found")).expect("serialise error");
    assert_eq!(value, json!({ "error": "code not found", "code": "not_found" }));
}

#[rstest]
fn deserialises_details_and_trace_id() {
    let error: Error = serde_json::from_value(json!({
        "error": "age must be between 18 and 99",
        "code": "invalid_request",
        "traceId": "abc",
        "details": { "field": "age", "code": "out_of_range" },
    }))
    .expect("deserialise error");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.trace_id(), Some("abc"));
    assert_eq!(
        error.details(),
        Some(&json!({ "field": "age", "code": "out_of_range" }))
    );
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "error": " ", "code": "internal_error" }));
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialisation_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(json!({ "error": "bad", "code": "invalid_request" }))
            .expect("deserialise error")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[given("an empty error message")]
fn an_empty_error_message() -> (ErrorCode, String) {
    (ErrorCode::Conflict, "   ".to_owned())
}

#[when("the error is constructed")]
fn the_error_is_constructed(payload: (ErrorCode, String)) -> Result<Error, ErrorValidationError> {
    Error::try_new(payload.0, payload.1)
}

#[then("construction fails with an empty message")]
fn construction_fails_with_empty_message(result: Result<Error, ErrorValidationError>) {
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn constructing_an_error_with_blank_message_fails() {
    let payload = an_empty_error_message();
    let result = the_error_is_constructed(payload);
    construction_fails_with_empty_message(result);
}
