use super::*;

fn node(name: &str, depth: usize) -> DependencyNode {
    DependencyNode::new(name, "1.0.0", "ref", depth)
}

fn by_name(node: &DependencyNode) -> String {
    node.name.clone()
}

#[test]
fn test_diamond_collapses_to_four_nodes() {
    let root = node("a", 0)
        .with_child(node("b", 1).with_child(node("d", 2)))
        .with_child(node("c", 1).with_child(node("d", 2)));
    let tree = DependencyTree::from_root(root);

    let graph = SkillGraph::from_tree(&tree, by_name);

    assert_eq!(graph.node_count(), 4);
    assert!(!graph.has_cycles());

    let first = graph.node_indices().next().unwrap();
    assert_eq!(graph.key(first), "a");
    assert_eq!(graph.dependency_count(first), 2);
}

#[test]
fn test_dependents_follow_first_seen_order() {
    let root = node("r", 0)
        .with_child(node("a", 1).with_child(node("u", 2)))
        .with_child(node("b", 1).with_child(node("u", 2)));
    let tree = DependencyTree::from_root(root);
    let graph = SkillGraph::from_tree(&tree, by_name);

    let u = graph
        .node_indices()
        .find(|&idx| graph.key(idx) == "u")
        .unwrap();
    let dependents: Vec<&str> = graph
        .dependents_of(u)
        .into_iter()
        .map(|idx| graph.key(idx).as_str())
        .collect();
    assert_eq!(dependents, vec!["a", "b"]);
}

#[test]
fn test_repeated_edges_are_not_duplicated() {
    let root = node("a", 0).with_child(node("b", 1)).with_child(node("b", 1));
    let tree = DependencyTree::from_root(root);
    let graph = SkillGraph::from_tree(&tree, by_name);

    let a = graph.node_indices().next().unwrap();
    assert_eq!(graph.dependency_count(a), 1);
}

#[test]
fn test_self_reference_is_cyclic() {
    let root = node("a", 0).with_child(node("a", 1));
    let tree = DependencyTree::from_root(root);
    let graph = SkillGraph::from_tree(&tree, by_name);

    assert_eq!(graph.node_count(), 1);
    assert!(graph.has_cycles());
}
