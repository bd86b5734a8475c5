//! Tests for vertex and edge types.

use super::types::{canonical_order, CanonicalPair, NewUser, UserId};
use crate::error::Error;

#[test]
fn test_canonical_order_is_symmetric() {
    let a = UserId::from("alice");
    let b = UserId::from("bob");
    assert_eq!(canonical_order(&a, &b), canonical_order(&b, &a));
    assert_eq!(canonical_order(&b, &a), (&a, &b));
}

#[test]
fn test_canonical_pair_orders_endpoints() {
    let pair = CanonicalPair::new(&UserId::from("zed"), &UserId::from("amy")).unwrap();
    assert_eq!(pair.first().as_str(), "amy");
    assert_eq!(pair.second().as_str(), "zed");
}

#[test]
fn test_canonical_pair_equal_regardless_of_argument_order() {
    let a = UserId::from("alice");
    let b = UserId::from("bob");
    assert_eq!(
        CanonicalPair::new(&a, &b).unwrap(),
        CanonicalPair::new(&b, &a).unwrap()
    );
}

#[test]
fn test_canonical_pair_rejects_self_loop() {
    let a = UserId::from("alice");
    let err = CanonicalPair::new(&a, &a).unwrap_err();
    assert_eq!(err, Error::SelfConnection("alice".to_string()));
}

#[test]
fn test_ordering_is_bytewise_not_case_folded() {
    // Uppercase sorts before lowercase.
    let pair = CanonicalPair::new(&UserId::from("bob"), &UserId::from("Zed")).unwrap();
    assert_eq!(pair.first().as_str(), "Zed");
}

#[test]
fn test_canonical_pair_contains() {
    let pair = CanonicalPair::new(&UserId::from("a1"), &UserId::from("b2")).unwrap();
    assert!(pair.contains(&UserId::from("a1")));
    assert!(pair.contains(&UserId::from("b2")));
    assert!(!pair.contains(&UserId::from("c3")));
    assert_eq!(pair.to_string(), "a1-b2");
}

#[test]
fn test_user_id_serializes_as_plain_string() {
    let id = UserId::from("alice");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");
}

#[test]
fn test_new_user_builder() {
    let user = NewUser::new("alice", "Alice").with_email("alice@example.com");
    assert_eq!(user.user_str_id.as_str(), "alice");
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));
}
