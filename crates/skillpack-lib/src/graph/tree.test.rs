use super::*;

fn node(name: &str, depth: usize) -> DependencyNode {
    DependencyNode::new(name, "1.0.0", &format!("ref-{}", name), depth)
}

#[test]
fn test_preorder_walk_keeps_duplicates() {
    // a -> (b -> d), (c -> d)
    let root = node("a", 0)
        .with_child(node("b", 1).with_child(node("d", 2)))
        .with_child(node("c", 1).with_child(node("d", 2)));

    let names: Vec<&str> = root.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "d", "c", "d"]);
}

#[test]
fn test_tree_statistics() {
    let root = node("a", 0)
        .with_child(node("b", 1).with_child(node("d", 2).mark_installed()))
        .with_child(node("c", 1).with_child(node("d", 2).mark_installed()));

    let tree = DependencyTree::from_root(root);

    assert_eq!(tree.total_count, 5);
    assert_eq!(tree.max_depth, 2);
    assert_eq!(tree.installed_count, 2);
    assert!(tree.external_services.is_empty());
}

#[test]
fn test_single_node_tree() {
    let tree = DependencyTree::from_root(node("solo", 0));
    assert_eq!(tree.total_count, 1);
    assert_eq!(tree.max_depth, 0);
    assert_eq!(tree.flattened().count(), 1);
}

#[test]
fn test_find_returns_first_preorder_match() {
    let root = node("a", 0)
        .with_child(node("b", 1))
        .with_child(node("b", 1).with_child(node("z", 2)));
    let tree = DependencyTree::from_root(root);

    let b = tree.find("b").unwrap();
    assert!(b.children.is_empty());
    assert!(tree.find("missing").is_none());
}

#[test]
fn test_node_key() {
    let n = DependencyNode::new("x", "2.0.0", "ref", 0);
    assert_eq!(n.key(), ("x", "2.0.0"));
}
