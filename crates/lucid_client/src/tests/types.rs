use crate::types::{error_message, validate_shape};
use crate::{parse_method, Headers, LucidError, Payload};
use reqwest::{Method, StatusCode};

#[test]
fn test_parse_method_case_insensitive() {
    assert_eq!(parse_method("get").unwrap(), Method::GET);
    assert_eq!(parse_method("Put").unwrap(), Method::PUT);
    assert_eq!(parse_method("HEAD").unwrap(), Method::HEAD);
    assert_eq!(parse_method("delete").unwrap(), Method::DELETE);
}

#[test]
fn test_parse_method_rejects_garbage() {
    assert!(matches!(parse_method(""), Err(LucidError::InvalidMethod(_))));
    assert!(matches!(parse_method("GE T"), Err(LucidError::InvalidMethod(_))));
}

#[test]
fn test_body_not_allowed_on_bodyless_methods() {
    let body = Payload::from_static(b"x");
    for method in [Method::GET, Method::DELETE, Method::HEAD] {
        let err = validate_shape(&method, Some(&body)).unwrap_err();
        assert!(matches!(err, LucidError::InvalidRequestShape(_)));
        assert!(err.to_string().contains("GET, DELETE, HEAD"));
    }
}

#[test]
fn test_put_requires_body() {
    assert!(matches!(
        validate_shape(&Method::PUT, None),
        Err(LucidError::InvalidRequestShape(_))
    ));
    assert!(matches!(
        validate_shape(&Method::PUT, Some(&Payload::new())),
        Err(LucidError::InvalidRequestShape(_))
    ));
    assert!(validate_shape(&Method::PUT, Some(&Payload::from_static(b"bar"))).is_ok());
}

#[test]
fn test_empty_body_counts_as_none() {
    assert!(validate_shape(&Method::GET, Some(&Payload::new())).is_ok());
    assert!(validate_shape(&Method::POST, None).is_ok());
}

#[test]
fn test_headers_case_insensitive_override() {
    let mut headers = Headers::new();
    headers.insert("authorization", "Bearer caller");
    headers.insert("X-Trace", "1");

    let mut merged = Headers::new();
    merged.merge_with(&headers);
    merged.insert("Authorization", "Bearer token");

    assert_eq!(merged.len(), 2);
    assert_eq!(merged.get("AUTHORIZATION"), Some("Bearer token"));

    let map = merged.to_reqwest_headers().unwrap();
    assert_eq!(map.get("authorization").unwrap(), "Bearer token");
    assert_eq!(map.get("x-trace").unwrap(), "1");
}

#[test]
fn test_headers_invalid_value_rejected() {
    let headers = Headers::new().with("x-bad", "line\nbreak");
    assert!(matches!(
        headers.to_reqwest_headers(),
        Err(LucidError::InvalidRequestShape(_))
    ));
}

#[test]
fn test_error_message_fallbacks() {
    assert_eq!(
        error_message(StatusCode::NOT_FOUND, r#"{"message":"Key not found"}"#),
        "Key not found"
    );
    assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
    assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
}
