//! Classification of document service responses.

use plategen_domain::{validate_invocation_response, FailureKind, InvocationResponse};
use serde_json::json;

#[test]
fn empty_payload_reports_invocation_status() {
    let response = InvocationResponse::new(300, "");
    let err = validate_invocation_response(&response).unwrap_err();

    assert_eq!(err.kind, FailureKind::EmptyPayload);
    assert_eq!(err.status_code, 500);
    assert_eq!(
        err.body,
        "Lambda invocation returned error: 300 with empty payload."
    );
}

#[test]
fn unparseable_payload_is_bad_data() {
    let response = InvocationResponse::new(500, r#"{"headers:123}"#);
    let err = validate_invocation_response(&response).unwrap_err();

    assert_eq!(err.kind, FailureKind::BadData);
    assert_eq!(err.status_code, 500);
    assert_eq!(err.body, r#"Lambda invocation returned bad data: {"headers:123}"#);
}

#[test]
fn failing_embedded_status_is_invocation_error() {
    let response = InvocationResponse::new(401, r#"{"statusCode":401,"body":"Unauthorized"}"#);
    let err = validate_invocation_response(&response).unwrap_err();

    assert_eq!(err.kind, FailureKind::InvocationError);
    assert_eq!(err.status_code, 500);
    assert_eq!(err.body, "Lambda invocation returned error: 401 Unauthorized");
    assert_eq!(err.to_string(), err.body);
}

#[test]
fn numeric_string_status_is_invocation_error() {
    let response = InvocationResponse::new(200, r#"{"statusCode":"500","body":"Internal error"}"#);
    let err = validate_invocation_response(&response).unwrap_err();

    assert_eq!(err.kind, FailureKind::InvocationError);
    assert_eq!(err.status_code, 500);
    assert_eq!(
        err.body,
        "Lambda invocation returned error: 500 Internal error"
    );
}

#[test]
fn non_numeric_string_status_is_not_a_failure() {
    let response = InvocationResponse::new(200, r#"{"statusCode":"OK","body":"x"}"#);
    assert!(validate_invocation_response(&response).is_ok());
}

#[test]
fn integral_float_status_prints_as_integer() {
    let response = InvocationResponse::new(200, r#"{"statusCode":401.0,"body":"Unauthorized"}"#);
    let err = validate_invocation_response(&response).unwrap_err();

    assert_eq!(err.kind, FailureKind::InvocationError);
    assert_eq!(err.body, "Lambda invocation returned error: 401 Unauthorized");
}

#[test]
fn missing_body_is_bad_data_with_trailing_period() {
    let response = InvocationResponse::new(401, r#"{"statusCode":300,"body":null}"#);
    let err = validate_invocation_response(&response).unwrap_err();

    assert_eq!(err.kind, FailureKind::BadData);
    assert_eq!(err.status_code, 400);
    assert_eq!(
        err.body,
        r#"Lambda invocation returned bad data: {"statusCode":300,"body":null}."#
    );
}

#[test]
fn absent_body_key_is_bad_data() {
    let response = InvocationResponse::new(200, r#"{"statusCode":200}"#);
    let err = validate_invocation_response(&response).unwrap_err();

    assert_eq!(err.kind, FailureKind::BadData);
    assert_eq!(err.status_code, 400);
}

#[test]
fn valid_payload_is_returned_as_parsed() {
    let response = InvocationResponse::new(200, r#"{"statusCode":200,"body":"{}"}"#);
    let body = validate_invocation_response(&response).unwrap();

    assert_eq!(body.status_code(), Some(200));
    assert_eq!(body.into_inner(), json!({"statusCode": 200, "body": "{}"}));
}
