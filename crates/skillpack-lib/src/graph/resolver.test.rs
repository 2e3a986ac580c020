// Tests for registry-backed dependency resolution

use super::*;
use crate::registry::InMemoryRegistry;

// ============================================================================
// Test Utilities
// ============================================================================

fn skill(name: &str, deps: &[&str]) -> SkillRecord {
    SkillRecord::new(name, "1.0.0", &format!("ref-{}", name)).with_dependencies(deps.iter().copied())
}

fn registry(records: Vec<SkillRecord>) -> Arc<InMemoryRegistry> {
    let mut registry = InMemoryRegistry::new();
    for record in records {
        registry.insert(record);
    }
    Arc::new(registry)
}

/// Linear chain s0 -> s1 -> ... -> s{len-1}
fn chain(len: usize) -> Arc<InMemoryRegistry> {
    let records = (0..len)
        .map(|i| {
            let name = format!("s{}", i);
            let deps: Vec<String> = if i + 1 < len {
                vec![format!("s{}", i + 1)]
            } else {
                Vec::new()
            };
            SkillRecord::new(&name, "1.0.0", &format!("ref-{}", name)).with_dependencies(deps)
        })
        .collect();
    registry(records)
}

fn diamond() -> Arc<InMemoryRegistry> {
    registry(vec![
        skill("A", &["B", "C"]),
        skill("B", &["D"]),
        skill("C", &["D"]),
        skill("D", &[]),
    ])
}

// ============================================================================
// Resolution Tests
// ============================================================================

#[tokio::test]
async fn test_resolve_single_skill() {
    let resolver = DependencyResolver::new(registry(vec![skill("solo", &[])]));
    let tree = resolver
        .resolve("solo", &ResolveOptions::default())
        .await
        .unwrap();

    assert_eq!(tree.root.name, "solo");
    assert_eq!(tree.root.storage_ref, "ref-solo");
    assert_eq!(tree.total_count, 1);
    assert_eq!(tree.max_depth, 0);
    assert_eq!(tree.installed_count, 0);
}

#[tokio::test]
async fn test_resolve_diamond_statistics() {
    let resolver = DependencyResolver::new(diamond());
    let tree = resolver.resolve("A", &ResolveOptions::default()).await.unwrap();

    assert_eq!(tree.total_count, 5);
    assert_eq!(tree.max_depth, 2);

    let names: Vec<&str> = tree.flattened().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "D", "C", "D"]);

    let depths: Vec<usize> = tree.flattened().map(|n| n.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 1, 2]);
}

#[tokio::test]
async fn test_diamond_fetches_shared_dependency_once() {
    let registry = diamond();
    let resolver = DependencyResolver::new(registry.clone());
    let tree = resolver.resolve("A", &ResolveOptions::default()).await.unwrap();

    // D appears once per referencing branch
    assert_eq!(tree.flattened().filter(|n| n.name == "D").count(), 2);
    // but is fetched exactly once
    assert_eq!(registry.lookup_count("D").await, 1);
    assert_eq!(registry.total_lookups().await, 4);
}

#[tokio::test]
async fn test_cache_is_per_call() {
    let registry = diamond();
    let resolver = DependencyResolver::new(registry.clone());

    resolver.resolve("A", &ResolveOptions::default()).await.unwrap();
    resolver.resolve("A", &ResolveOptions::default()).await.unwrap();

    assert_eq!(registry.lookup_count("D").await, 2);
}

#[tokio::test]
async fn test_children_keep_declared_order() {
    let resolver = DependencyResolver::new(registry(vec![
        skill("root", &["zeta", "alpha", "mid"]),
        skill("zeta", &[]),
        skill("alpha", &[]),
        skill("mid", &[]),
    ]));
    let tree = resolver.resolve("root", &ResolveOptions::default()).await.unwrap();

    let children: Vec<&str> = tree.root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(children, vec!["zeta", "alpha", "mid"]);
}

// ============================================================================
// Not Found
// ============================================================================

#[tokio::test]
async fn test_missing_root_fails_not_found() {
    let resolver = DependencyResolver::new(registry(vec![]));
    let err = resolver
        .resolve("ghost", &ResolveOptions::default())
        .await
        .unwrap_err();

    match err {
        GraphError::NotFound { name, required_by } => {
            assert_eq!(name, "ghost");
            assert_eq!(required_by, None);
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_transitive_names_parent() {
    let resolver = DependencyResolver::new(registry(vec![
        skill("app", &["lib"]),
        skill("lib", &["gone"]),
    ]));
    let err = resolver
        .resolve("app", &ResolveOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        GraphError::NotFound { name, required_by: Some(parent) } if name == "gone" && parent == "lib"
    ));
    assert!(err.to_string().contains("gone"));
}

#[tokio::test]
async fn test_registry_failure_propagates() {
    let registry = InMemoryRegistry::new()
        .with_skill(skill("app", &["flaky"]))
        .with_failure("flaky", "connection reset");
    let resolver = DependencyResolver::new(Arc::new(registry));

    let err = resolver
        .resolve("app", &ResolveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::Registry(_)));
}

// ============================================================================
// Depth Limit
// ============================================================================

#[tokio::test]
async fn test_chain_beyond_max_depth_fails() {
    // Depths 0..=11 exceed the default limit of 10
    let resolver = DependencyResolver::new(chain(12));
    let err = resolver
        .resolve("s0", &ResolveOptions::default())
        .await
        .unwrap_err();

    match err {
        GraphError::DepthLimitExceeded { max_depth, path } => {
            assert_eq!(max_depth, DEFAULT_MAX_DEPTH);
            assert!(path.starts_with("s0 → s1"));
            assert!(path.ends_with("s11"));
        }
        other => panic!("Expected DepthLimitExceeded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_same_chain_with_raised_limit_succeeds() {
    let resolver = DependencyResolver::new(chain(12));
    let tree = resolver
        .resolve("s0", &ResolveOptions::default().with_max_depth(11))
        .await
        .unwrap();

    assert_eq!(tree.max_depth, 11);
    assert_eq!(tree.total_count, 12);
}

#[tokio::test]
async fn test_depth_limit_checked_before_fetch() {
    let registry = chain(3);
    let resolver = DependencyResolver::new(registry.clone());
    let err = resolver
        .resolve("s0", &ResolveOptions::default().with_max_depth(1))
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::DepthLimitExceeded { .. }));
    assert_eq!(registry.lookup_count("s2").await, 0);
}

#[tokio::test]
async fn test_zero_depth_allows_root_only() {
    let resolver = DependencyResolver::new(registry(vec![skill("solo", &[])]));
    let tree = resolver
        .resolve("solo", &ResolveOptions::default().with_max_depth(0))
        .await
        .unwrap();
    assert_eq!(tree.total_count, 1);
}

// ============================================================================
// Cycle Short-Circuit
// ============================================================================

#[tokio::test]
async fn test_two_node_cycle_fails_with_both_names() {
    let resolver = DependencyResolver::new(registry(vec![skill("A", &["B"]), skill("B", &["A"])]));
    let err = resolver
        .resolve("A", &ResolveOptions::default())
        .await
        .unwrap_err();

    match &err {
        GraphError::CircularDependency { cycle } => assert_eq!(cycle, "A → B → A"),
        other => panic!("Expected CircularDependency, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains('A') && message.contains('B'));
}

#[tokio::test]
async fn test_self_dependency_fails() {
    let resolver = DependencyResolver::new(registry(vec![skill("loop", &["loop"])]));
    let err = resolver
        .resolve("loop", &ResolveOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GraphError::CircularDependency { ref cycle } if cycle == "loop → loop"
    ));
}

#[tokio::test]
async fn test_cycle_below_root_reports_only_cycle_members() {
    let resolver = DependencyResolver::new(registry(vec![
        skill("app", &["x"]),
        skill("x", &["y"]),
        skill("y", &["z"]),
        skill("z", &["x"]),
    ]));
    let err = resolver
        .resolve("app", &ResolveOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GraphError::CircularDependency { ref cycle } if cycle == "x → y → z → x"
    ));
}

#[tokio::test]
async fn test_diamond_is_not_a_cycle() {
    let resolver = DependencyResolver::new(diamond());
    assert!(resolver.resolve("A", &ResolveOptions::default()).await.is_ok());
}

// ============================================================================
// External Services
// ============================================================================

#[tokio::test]
async fn test_external_services_are_noted_not_resolved() {
    let registry = registry(vec![
        skill("web", &["service:postgres", "http"]),
        skill("http", &["service:postgres", "service:redis"]),
    ]);
    let resolver = DependencyResolver::new(registry.clone());
    let tree = resolver.resolve("web", &ResolveOptions::default()).await.unwrap();

    assert_eq!(tree.total_count, 2);
    assert_eq!(
        tree.external_services,
        vec!["service:postgres".to_string(), "service:redis".to_string()]
    );
    assert_eq!(registry.lookup_count("service:postgres").await, 0);
}

// ============================================================================
// Already Installed
// ============================================================================

#[tokio::test]
async fn test_skip_installed_flags_and_prunes_subtree() {
    let registry = registry(vec![
        skill("app", &["lib", "util"]),
        skill("lib", &["core"]),
        skill("core", &[]),
        skill("util", &[]),
    ]);
    let resolver = DependencyResolver::new(registry.clone())
        .with_installed([("lib".to_string(), "1.0.0".to_string())]);

    let tree = resolver
        .resolve("app", &ResolveOptions::default().skip_installed(true))
        .await
        .unwrap();

    let lib = tree.find("lib").unwrap();
    assert!(lib.installed);
    assert!(lib.children.is_empty());
    assert_eq!(tree.installed_count, 1);
    assert_eq!(registry.lookup_count("core").await, 0);
}

#[tokio::test]
async fn test_installed_set_ignored_without_skip_flag() {
    let resolver = DependencyResolver::new(diamond())
        .with_installed([("D".to_string(), "1.0.0".to_string())]);

    let tree = resolver.resolve("A", &ResolveOptions::default()).await.unwrap();
    assert_eq!(tree.installed_count, 0);
}

#[tokio::test]
async fn test_installed_requires_matching_version() {
    let resolver = DependencyResolver::new(diamond())
        .with_installed([("D".to_string(), "0.9.0".to_string())]);

    let tree = resolver
        .resolve("A", &ResolveOptions::default().skip_installed(true))
        .await
        .unwrap();
    assert_eq!(tree.installed_count, 0);
}

#[tokio::test]
async fn test_verbose_does_not_change_result() {
    let resolver = DependencyResolver::new(diamond());
    let quiet = resolver.resolve("A", &ResolveOptions::default()).await.unwrap();
    let loud = resolver
        .resolve("A", &ResolveOptions::default().verbose(true))
        .await
        .unwrap();
    assert_eq!(quiet, loud);
}
