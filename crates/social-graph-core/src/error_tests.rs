//! Tests for error codes and messages.

use super::error::Error;

#[test]
fn test_error_display() {
    let err = Error::VertexNotFound("dave".to_string());
    assert_eq!(err.to_string(), "User 'dave' not found");

    let err = Error::EdgeAlreadyExists("alice".to_string(), "bob".to_string());
    assert_eq!(
        err.to_string(),
        "Connection already exists between 'alice' and 'bob'"
    );
}

#[test]
fn test_error_codes_are_stable() {
    let cases = [
        (Error::VertexNotFound("a".into()), "USER_NOT_FOUND"),
        (Error::SelfConnection("a".into()), "INVALID_CONNECTION"),
        (
            Error::EdgeAlreadyExists("a".into(), "b".into()),
            "CONNECTION_EXISTS",
        ),
        (
            Error::EdgeNotFound("a".into(), "b".into()),
            "CONNECTION_NOT_FOUND",
        ),
        (Error::UserAlreadyExists("a".into()), "USER_EXISTS"),
        (Error::StoreUnavailable("down".into()), "DATABASE_UNAVAILABLE"),
        (Error::Config("bad".into()), "CONFIG_ERROR"),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code, "wrong code for {err:?}");
    }
}

#[test]
fn test_client_errors_exclude_store_failures() {
    assert!(Error::SelfConnection("a".into()).is_client_error());
    assert!(Error::EdgeNotFound("a".into(), "b".into()).is_client_error());
    assert!(!Error::StoreUnavailable("down".into()).is_client_error());
    assert!(!Error::Config("bad".into()).is_client_error());
}

#[test]
fn test_error_from_sqlx_is_store_unavailable() {
    let err: Error = sqlx::Error::PoolTimedOut.into();
    assert!(matches!(err, Error::StoreUnavailable(_)));
}
