//! End-to-end scenarios through the services over both store backends.

use std::sync::Arc;

use social_graph_core::{
    ConnectionService, EdgeStore, Error, InMemoryEdgeStore, NewUser, QueryService,
    SqliteEdgeStore, UserId, UserService,
};

struct Services {
    users: UserService,
    connections: ConnectionService,
    queries: QueryService,
}

impl Services {
    fn over(store: Arc<dyn EdgeStore>) -> Self {
        Self {
            users: UserService::new(store.clone()),
            connections: ConnectionService::new(store.clone()),
            queries: QueryService::new(store),
        }
    }
}

fn id(s: &str) -> UserId {
    UserId::from(s)
}

async fn run_alice_bob_carol_dave(services: &Services) {
    for (user, name) in [
        ("alice", "Alice"),
        ("bob", "Bob"),
        ("carol", "Carol"),
        ("dave", "Dave"),
    ] {
        services.users.register(NewUser::new(user, name)).await.unwrap();
    }

    services
        .connections
        .connect(&id("alice"), &id("bob"))
        .await
        .unwrap();
    services
        .connections
        .connect(&id("carol"), &id("bob"))
        .await
        .unwrap();

    let degree = services
        .queries
        .degree(&id("alice"), &id("carol"))
        .await
        .unwrap();
    assert_eq!(degree.degree, 2);

    let unreachable = services
        .queries
        .degree(&id("alice"), &id("dave"))
        .await
        .unwrap();
    assert_eq!(unreachable.degree, -1);
    assert_eq!(unreachable.message, Some("not_connected"));

    let friends = services.queries.friends(&id("alice")).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].display_name, "Bob");

    let fof = services
        .queries
        .friends_of_friends(&id("alice"))
        .await
        .unwrap();
    assert_eq!(fof.len(), 1);
    assert_eq!(fof[0].user_str_id, id("carol"));

    // Duplicate in reverse order.
    assert!(matches!(
        services.connections.connect(&id("bob"), &id("alice")).await,
        Err(Error::EdgeAlreadyExists(_, _))
    ));

    // Self-loop leaves the edge set untouched.
    assert!(matches!(
        services.connections.connect(&id("alice"), &id("alice")).await,
        Err(Error::SelfConnection(_))
    ));
    assert_eq!(services.connections.list().await.unwrap().len(), 2);

    // Removing a missing edge leaves the edge set untouched.
    assert!(matches!(
        services.connections.disconnect(&id("alice"), &id("dave")).await,
        Err(Error::EdgeNotFound(_, _))
    ));
    assert_eq!(services.connections.list().await.unwrap().len(), 2);

    services
        .connections
        .disconnect(&id("bob"), &id("carol"))
        .await
        .unwrap();
    assert_eq!(
        services
            .queries
            .degree(&id("alice"), &id("carol"))
            .await
            .unwrap()
            .degree,
        -1
    );
}

#[tokio::test]
async fn test_scenario_in_memory() {
    let services = Services::over(Arc::new(InMemoryEdgeStore::new()));
    run_alice_bob_carol_dave(&services).await;
}

#[tokio::test]
async fn test_scenario_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("scenario.db").display());
    let store = SqliteEdgeStore::connect(&url, 4).await.unwrap();
    let services = Services::over(Arc::new(store));
    run_alice_bob_carol_dave(&services).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_connects_single_winner_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("race.db").display());
    let store: Arc<dyn EdgeStore> = Arc::new(SqliteEdgeStore::connect(&url, 4).await.unwrap());
    let services = Services::over(store);
    for user in ["alice", "bob"] {
        services.users.register(NewUser::new(user, user)).await.unwrap();
    }

    let connections = services.connections.clone();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let connections = connections.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    connections.connect(&id("alice"), &id("bob")).await
                } else {
                    connections.connect(&id("bob"), &id("alice")).await
                }
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(Error::EdgeAlreadyExists(_, _)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(services.connections.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_large_neighbourhoods_sqlite() {
    const SPOKES: usize = 1_200;

    let store = SqliteEdgeStore::connect("sqlite::memory:", 1).await.unwrap();
    let services = Services::over(Arc::new(store));
    services.users.register(NewUser::new("hub", "Hub")).await.unwrap();
    services.users.register(NewUser::new("outer", "Outer")).await.unwrap();
    services
        .connections
        .connect(&id("outer"), &id("hub"))
        .await
        .unwrap();

    for n in 0..SPOKES {
        let spoke = format!("spoke{n:05}");
        services
            .users
            .register(NewUser::new(spoke.as_str(), &spoke))
            .await
            .unwrap();
        services
            .connections
            .connect(&id("hub"), &id(&spoke))
            .await
            .unwrap();
    }

    let friends = services.queries.friends(&id("hub")).await.unwrap();
    assert_eq!(friends.len(), SPOKES + 1);
    assert!(friends.iter().any(|f| f.display_name == "Outer"));

    let fof = services
        .queries
        .friends_of_friends(&id("outer"))
        .await
        .unwrap();
    assert_eq!(fof.len(), SPOKES);
    assert_eq!(fof[0].user_str_id, id("spoke00000"));

    let listed = services.connections.list().await.unwrap();
    assert_eq!(listed.len(), SPOKES + 1);
    assert!(listed
        .iter()
        .all(|c| !c.user1_name.is_empty() && !c.user2_name.is_empty()));
}
