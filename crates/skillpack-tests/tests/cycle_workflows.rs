//! Cycle handling across resolution, detection and ordering

use skillpack_lib::graph::{
    DependencyNode, DependencyResolver, DependencyTree, GraphError, ResolveOptions,
    detect_circular, topological_sort,
};
use skillpack_lib::plan::plan_install;
use skillpack_tests::{SkillSet, skill};
use std::sync::Arc;

#[tokio::test]
async fn resolver_reports_triangle_path() {
    let registry = Arc::new(SkillSet::triangle().registry());

    let err = DependencyResolver::new(registry)
        .resolve("a", &ResolveOptions::default())
        .await
        .unwrap_err();

    match err {
        GraphError::CircularDependency { cycle } => assert_eq!(cycle, "a → b → c → a"),
        other => panic!("expected cycle error, got {:?}", other),
    }
}

#[tokio::test]
async fn self_dependency_is_a_cycle() {
    let set = SkillSet::new().with(skill("narcissus", "1.0.0", &["narcissus"]));
    let registry = Arc::new(set.registry());

    let err = plan_install(registry, None, "narcissus", &ResolveOptions::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("narcissus → narcissus"));
}

#[test]
fn detector_and_sorter_agree_on_hand_built_cycle() {
    let root = DependencyNode::new("a", "1.0.0", "ref-a", 0).with_child(
        DependencyNode::new("b", "1.0.0", "ref-b", 1)
            .with_child(DependencyNode::new("a", "1.0.0", "ref-a", 2)),
    );
    let tree = DependencyTree::from_root(root);

    let cycles = detect_circular(&tree);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].path.first(), cycles[0].path.last());
    assert!(cycles[0].path.contains(&"b".to_string()));

    assert!(matches!(
        topological_sort(&tree),
        Err(GraphError::CycleDetected { .. })
    ));
}

#[test]
fn acyclic_tree_has_no_cycles() {
    let root = DependencyNode::new("app", "1.0.0", "ref-app", 0)
        .with_child(DependencyNode::new("util", "1.0.0", "ref-util", 1));
    let tree = DependencyTree::from_root(root);

    assert!(detect_circular(&tree).is_empty());
    assert_eq!(topological_sort(&tree).unwrap(), vec!["util", "app"]);
}
