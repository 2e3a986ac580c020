// Tests for install ordering

use super::*;
use crate::graph::tree::DependencyNode;
use std::collections::HashSet;

fn node(name: &str, depth: usize) -> DependencyNode {
    DependencyNode::new(name, "1.0.0", "ref", depth)
}

fn position(order: &[String], name: &str) -> usize {
    order
        .iter()
        .position(|n| n == name)
        .unwrap_or_else(|| panic!("{} missing from order {:?}", name, order))
}

/// Every child must come strictly before its parent
fn assert_dependencies_first(tree: &DependencyTree, order: &[String]) {
    for parent in tree.flattened() {
        for child in &parent.children {
            assert!(
                position(order, &child.name) < position(order, &parent.name),
                "{} should precede {} in {:?}",
                child.name,
                parent.name,
                order
            );
        }
    }
}

fn assert_unique_names(tree: &DependencyTree, order: &[String]) {
    let expected: HashSet<&str> = tree.flattened().map(|n| n.name.as_str()).collect();
    let actual: HashSet<&str> = order.iter().map(String::as_str).collect();
    assert_eq!(expected, actual);
    assert_eq!(order.len(), expected.len(), "names must appear exactly once");
}

#[test]
fn test_single_node() {
    let tree = DependencyTree::from_root(node("solo", 0));
    assert_eq!(topological_sort(&tree).unwrap(), vec!["solo"]);
}

#[test]
fn test_linear_chain_reverses() {
    let tree = DependencyTree::from_root(
        node("a", 0).with_child(node("b", 1).with_child(node("c", 2))),
    );
    assert_eq!(topological_sort(&tree).unwrap(), vec!["c", "b", "a"]);
}

#[test]
fn test_diamond_order() {
    let tree = DependencyTree::from_root(
        node("A", 0)
            .with_child(node("B", 1).with_child(node("D", 2)))
            .with_child(node("C", 1).with_child(node("D", 2))),
    );
    let order = topological_sort(&tree).unwrap();

    assert_eq!(order.len(), 4);
    assert_eq!(order[0], "D");
    assert_eq!(order[3], "A");
    let b = position(&order, "B");
    let c = position(&order, "C");
    assert!(b > 0 && b < 3);
    assert!(c > 0 && c < 3);
    assert_unique_names(&tree, &order);
    assert_dependencies_first(&tree, &order);
}

#[test]
fn test_wide_and_deep_tree() {
    let tree = DependencyTree::from_root(
        node("app", 0)
            .with_child(
                node("web", 1)
                    .with_child(node("http", 2).with_child(node("bytes", 3)))
                    .with_child(node("json", 2)),
            )
            .with_child(node("cli", 1).with_child(node("json", 2)))
            .with_child(node("bytes", 1)),
    );
    let order = topological_sort(&tree).unwrap();

    assert_unique_names(&tree, &order);
    assert_dependencies_first(&tree, &order);
    assert_eq!(order.last().map(String::as_str), Some("app"));
}

#[test]
fn test_order_is_name_only_across_versions() {
    // Two versions of the same leaf collapse to one entry
    let tree = DependencyTree::from_root(
        node("app", 0)
            .with_child(node("x", 1).with_child(DependencyNode::new("leaf", "1.0.0", "r1", 2)))
            .with_child(node("y", 1).with_child(DependencyNode::new("leaf", "2.0.0", "r2", 2))),
    );
    let order = topological_sort(&tree).unwrap();

    assert_eq!(order.iter().filter(|n| *n == "leaf").count(), 1);
    assert_eq!(order[0], "leaf");
}

#[test]
fn test_missed_cycle_is_rejected() {
    let tree = DependencyTree::from_root(
        node("a", 0).with_child(node("b", 1).with_child(node("a", 2))),
    );
    let err = topological_sort(&tree).unwrap_err();

    match err {
        GraphError::CycleDetected { remaining } => {
            assert!(remaining.contains('a'));
            assert!(remaining.contains('b'));
        }
        other => panic!("Expected CycleDetected, got {:?}", other),
    }
}

#[test]
fn test_self_loop_is_rejected() {
    let tree = DependencyTree::from_root(node("a", 0).with_child(node("a", 1)));
    assert!(matches!(
        topological_sort(&tree),
        Err(GraphError::CycleDetected { .. })
    ));
}

#[test]
fn test_deterministic_across_runs() {
    let tree = DependencyTree::from_root(
        node("root", 0)
            .with_child(node("p", 1))
            .with_child(node("q", 1))
            .with_child(node("r", 1)),
    );
    let first = topological_sort(&tree).unwrap();
    for _ in 0..5 {
        assert_eq!(topological_sort(&tree).unwrap(), first);
    }
    assert_eq!(first, vec!["p", "q", "r", "root"]);
}
