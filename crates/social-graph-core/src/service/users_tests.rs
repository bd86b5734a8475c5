//! Tests for UserService.

use std::sync::Arc;

use super::UserService;
use crate::error::Error;
use crate::graph::{NewUser, UserId};
use crate::store::InMemoryEdgeStore;

fn service() -> UserService {
    UserService::new(Arc::new(InMemoryEdgeStore::new()))
}

#[tokio::test]
async fn test_register_then_get() {
    let users = service();
    let created = users
        .register(NewUser::new("alice", "Alice Smith").with_email("alice@example.com"))
        .await
        .unwrap();
    let fetched = users.get(&UserId::from("alice")).await.unwrap();
    assert_eq!(created, fetched);
}

#[tokio::test]
async fn test_register_duplicate() {
    let users = service();
    users.register(NewUser::new("alice", "Alice")).await.unwrap();
    let err = users
        .register(NewUser::new("alice", "Alice Again"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "USER_EXISTS");
}

#[tokio::test]
async fn test_get_missing_user() {
    let err = service().get(&UserId::from("ghost")).await.unwrap_err();
    assert_eq!(err, Error::VertexNotFound("ghost".to_string()));
}

#[tokio::test]
async fn test_list_newest_first() {
    let users = service();
    for id in ["alice", "bob"] {
        users.register(NewUser::new(id, id)).await.unwrap();
    }
    let listed = users.list().await.unwrap();
    assert_eq!(listed[0].user_str_id.as_str(), "bob");
    assert_eq!(listed[1].user_str_id.as_str(), "alice");
}
