// Tests for dependency cycle detection

use super::*;
use crate::graph::tree::DependencyNode;

fn node(name: &str, depth: usize) -> DependencyNode {
    DependencyNode::new(name, "1.0.0", "ref", depth)
}

fn versioned(name: &str, version: &str, depth: usize) -> DependencyNode {
    DependencyNode::new(name, version, "ref", depth)
}

fn assert_closed(cycle: &Cycle) {
    assert_eq!(cycle.path.first(), cycle.path.last(), "cycle must start and end on the same skill");
}

// ============================================================================
// Acyclic Shapes
// ============================================================================

#[test]
fn test_linear_chain_has_no_cycles() {
    let root = node("a", 0).with_child(node("b", 1).with_child(node("c", 2)));
    assert!(detect_circular(&DependencyTree::from_root(root)).is_empty());
}

#[test]
fn test_diamond_has_no_cycles() {
    let root = node("a", 0)
        .with_child(node("b", 1).with_child(node("d", 2)))
        .with_child(node("c", 1).with_child(node("d", 2)));
    assert!(detect_circular(&DependencyTree::from_root(root)).is_empty());
}

#[test]
fn test_forest_of_independent_branches_has_no_cycles() {
    let root = node("root", 0)
        .with_child(node("x", 1).with_child(node("x1", 2)))
        .with_child(node("y", 1).with_child(node("y1", 2)))
        .with_child(node("z", 1));
    assert!(detect_circular(&DependencyTree::from_root(root)).is_empty());
}

#[test]
fn test_opposite_edges_in_sibling_branches_are_not_a_cycle() {
    // r -> x -> y and r -> y -> x: no skill repeats on any single path
    let root = node("r", 0)
        .with_child(node("x", 1).with_child(node("y", 2)))
        .with_child(node("y", 1).with_child(node("x", 2)));
    let tree = DependencyTree::from_root(root);

    assert!(detect_circular(&tree).is_empty());
}

#[test]
fn test_same_name_different_version_is_not_a_cycle() {
    let root = versioned("a", "2.0.0", 0).with_child(versioned("a", "1.0.0", 1));
    assert!(detect_circular(&DependencyTree::from_root(root)).is_empty());
}

// ============================================================================
// Cyclic Shapes
// ============================================================================

#[test]
fn test_self_cycle() {
    let root = node("a", 0).with_child(node("a", 1));
    let cycles = detect_circular(&DependencyTree::from_root(root));

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].path, vec!["a", "a"]);
    assert!(cycles[0].is_self_cycle());
    assert_closed(&cycles[0]);
}

#[test]
fn test_three_node_cycle_path() {
    // a -> b -> c -> a
    let root = node("a", 0).with_child(node("b", 1).with_child(node("c", 2).with_child(node("a", 3))));
    let cycles = detect_circular(&DependencyTree::from_root(root));

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].path, vec!["a", "b", "c", "a"]);
    assert_eq!(cycles[0].description, "a → b → c → a");
    assert_eq!(cycles[0].to_string(), "a → b → c → a");
    assert_closed(&cycles[0]);
}

#[test]
fn test_cycle_below_root_excludes_root() {
    let root = node("app", 0).with_child(node("x", 1).with_child(node("y", 2).with_child(node("x", 3))));
    let cycles = detect_circular(&DependencyTree::from_root(root));

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].path, vec!["x", "y", "x"]);
}

#[test]
fn test_independent_cycles_in_disjoint_branches_are_all_reported() {
    let root = node("root", 0)
        .with_child(node("p", 1).with_child(node("q", 2).with_child(node("p", 3))))
        .with_child(node("m", 1).with_child(node("n", 2).with_child(node("m", 3))));
    let cycles = detect_circular(&DependencyTree::from_root(root));

    assert_eq!(cycles.len(), 2);
    let descriptions: Vec<&str> = cycles.iter().map(|c| c.description.as_str()).collect();
    assert!(descriptions.contains(&"p → q → p"));
    assert!(descriptions.contains(&"m → n → m"));
    cycles.iter().for_each(assert_closed);
}

#[test]
fn test_cycle_through_diamond_branch() {
    // a -> b -> d, a -> c -> d -> c
    let root = node("a", 0)
        .with_child(node("b", 1).with_child(node("d", 2)))
        .with_child(node("c", 1).with_child(node("d", 2).with_child(node("c", 3))));
    let cycles = detect_circular(&DependencyTree::from_root(root));

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].path, vec!["c", "d", "c"]);
}

#[test]
fn test_cycle_under_duplicated_subtree_is_reported_once() {
    let looped = || node("s", 2).with_child(node("t", 3).with_child(node("s", 4)));
    let root = node("r", 0)
        .with_child(node("a", 1).with_child(looped()))
        .with_child(node("b", 1).with_child(looped()));
    let cycles = detect_circular(&DependencyTree::from_root(root));

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].description, "s → t → s");
}
