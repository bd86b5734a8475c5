//! Tests for BFS degree of separation and neighborhood queries.

use super::snapshot::GraphSnapshot;
use super::traversal::{
    degree_of_separation, direct_neighbors, second_degree_neighbors, Separation,
};
use super::types::UserId;

fn id(s: &str) -> UserId {
    UserId::from(s)
}

fn build(pairs: &[(&str, &str)]) -> GraphSnapshot {
    GraphSnapshot::build(pairs.iter().map(|(a, b)| (id(a), id(b))))
}

fn names<'a>(set: impl IntoIterator<Item = &'a UserId>) -> Vec<&'a str> {
    set.into_iter().map(UserId::as_str).collect()
}

/// Build a linear graph: a - b - c - d - e
fn build_linear_graph() -> GraphSnapshot {
    build(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")])
}

/// Build a graph with a shortcut: a - b - c - d plus a - d
fn build_shortcut_graph() -> GraphSnapshot {
    build(&[("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")])
}

// ── Degree of separation ───────────────────────────────────────────

#[test]
fn test_degree_same_vertex_is_zero() {
    let graph = build_linear_graph();
    assert_eq!(
        degree_of_separation(&graph, &id("c"), &id("c")),
        Separation::Degree(0)
    );
}

#[test]
fn test_degree_same_isolated_vertex_is_zero() {
    let graph = GraphSnapshot::new();
    assert_eq!(
        degree_of_separation(&graph, &id("dave"), &id("dave")),
        Separation::Degree(0)
    );
}

#[test]
fn test_degree_linear() {
    let graph = build_linear_graph();
    assert_eq!(
        degree_of_separation(&graph, &id("a"), &id("b")),
        Separation::Degree(1)
    );
    assert_eq!(
        degree_of_separation(&graph, &id("a"), &id("e")),
        Separation::Degree(4)
    );
    assert_eq!(
        degree_of_separation(&graph, &id("e"), &id("a")),
        Separation::Degree(4)
    );
}

#[test]
fn test_degree_takes_shortest_path() {
    let graph = build_shortcut_graph();
    assert_eq!(
        degree_of_separation(&graph, &id("a"), &id("d")),
        Separation::Degree(1)
    );
    assert_eq!(
        degree_of_separation(&graph, &id("b"), &id("d")),
        Separation::Degree(2)
    );
}

#[test]
fn test_degree_cycle_terminates() {
    let graph = build(&[("a", "b"), ("b", "c"), ("c", "a")]);
    assert_eq!(
        degree_of_separation(&graph, &id("a"), &id("zz")),
        Separation::NotConnected
    );
}

#[test]
fn test_degree_disconnected_components() {
    let graph = build(&[("a", "b"), ("x", "y")]);
    let result = degree_of_separation(&graph, &id("a"), &id("y"));
    assert_eq!(result, Separation::NotConnected);
    assert_eq!(result.as_i64(), -1);
    assert!(!result.is_connected());
}

#[test]
fn test_degree_isolated_source() {
    let graph = build(&[("a", "b")]);
    assert_eq!(
        degree_of_separation(&graph, &id("dave"), &id("a")),
        Separation::NotConnected
    );
}

#[test]
fn test_separation_as_i64() {
    assert_eq!(Separation::Degree(3).as_i64(), 3);
    assert_eq!(Separation::NotConnected.as_i64(), -1);
    assert_eq!(Separation::NOT_CONNECTED_MESSAGE, "not_connected");
}

// ── Neighborhoods ──────────────────────────────────────────────────

#[test]
fn test_direct_neighbors() {
    let graph = build(&[("alice", "bob"), ("alice", "carol"), ("bob", "dave")]);
    assert_eq!(
        names(direct_neighbors(&graph, &id("alice"))),
        vec!["bob", "carol"]
    );
}

#[test]
fn test_direct_neighbors_of_isolated_vertex() {
    let graph = build(&[("alice", "bob")]);
    assert!(direct_neighbors(&graph, &id("erin")).is_empty());
}

#[test]
fn test_second_degree_linear() {
    let graph = build_linear_graph();
    assert_eq!(names(second_degree_neighbors(&graph, &id("a"))), vec!["c"]);
    assert_eq!(
        names(second_degree_neighbors(&graph, &id("c"))),
        vec!["a", "e"]
    );
}

#[test]
fn test_second_degree_excludes_triangle_members() {
    // alice, bob, carol are pairwise connected; dave hangs off carol.
    let graph = build(&[
        ("alice", "bob"),
        ("bob", "carol"),
        ("alice", "carol"),
        ("carol", "dave"),
    ]);
    let fof = second_degree_neighbors(&graph, &id("alice"));
    assert_eq!(names(fof), vec!["dave"]);
}

#[test]
fn test_second_degree_deduplicates_multiple_paths() {
    // Diamond: a - b - d, a - c - d
    let graph = build(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
    assert_eq!(names(second_degree_neighbors(&graph, &id("a"))), vec!["d"]);
}

#[test]
fn test_second_degree_excludes_source() {
    let graph = build(&[("a", "b")]);
    assert!(second_degree_neighbors(&graph, &id("a")).is_empty());
}

#[test]
fn test_second_degree_isolated_vertex() {
    let graph = build_linear_graph();
    assert!(second_degree_neighbors(&graph, &id("nobody")).is_empty());
}

#[test]
fn test_alice_bob_carol_dave_example() {
    // alice - bob - carol, dave isolated
    let graph = build(&[("alice", "bob"), ("bob", "carol")]);
    assert_eq!(
        degree_of_separation(&graph, &id("alice"), &id("carol")),
        Separation::Degree(2)
    );
    assert_eq!(
        degree_of_separation(&graph, &id("alice"), &id("dave")),
        Separation::NotConnected
    );
    assert_eq!(names(direct_neighbors(&graph, &id("alice"))), vec!["bob"]);
    assert_eq!(
        names(second_degree_neighbors(&graph, &id("alice"))),
        vec!["carol"]
    );
}
