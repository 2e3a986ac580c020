//! Resolution and planning against in-memory catalogues

use anyhow::Result;
use skillpack_lib::graph::{DependencyResolver, GraphError, ResolveOptions};
use skillpack_lib::plan::plan_install;
use skillpack_tests::{SkillSet, skill};
use std::sync::Arc;

#[tokio::test]
async fn diamond_fetches_shared_dependency_once() -> Result<()> {
    let registry = Arc::new(SkillSet::diamond().registry());
    let resolver = DependencyResolver::new(registry.clone());

    let tree = resolver.resolve("app", &ResolveOptions::default()).await?;

    assert_eq!(tree.total_count, 5, "util appears under both auth and db");
    assert_eq!(tree.max_depth, 2);
    assert_eq!(registry.lookup_count("util").await, 1);
    assert_eq!(registry.total_lookups().await, 4);
    assert_eq!(tree.external_services, vec!["service:postgres".to_string()]);
    Ok(())
}

#[tokio::test]
async fn diamond_plan_orders_dependencies_first() -> Result<()> {
    let registry = Arc::new(SkillSet::diamond().registry());

    let plan = plan_install(registry, None, "app", &ResolveOptions::default()).await?;

    assert_eq!(plan.order, vec!["util", "auth", "db", "app"]);
    assert_eq!(plan.to_install, plan.order);
    assert_eq!(plan.transitive_count, 3);
    assert!(plan.service_advisory().unwrap().contains("service:postgres"));
    Ok(())
}

#[tokio::test]
async fn separate_resolutions_do_not_share_cache() -> Result<()> {
    let registry = Arc::new(SkillSet::diamond().registry());
    let resolver = DependencyResolver::new(registry.clone());

    resolver.resolve("app", &ResolveOptions::default()).await?;
    resolver.resolve("app", &ResolveOptions::default()).await?;

    assert_eq!(registry.lookup_count("util").await, 2);
    Ok(())
}

#[tokio::test]
async fn chain_at_depth_limit_resolves() -> Result<()> {
    let registry = Arc::new(SkillSet::chain(11).registry());

    let tree = DependencyResolver::new(registry)
        .resolve("s0", &ResolveOptions::default())
        .await?;

    assert_eq!(tree.max_depth, 10);
    assert_eq!(tree.total_count, 11);
    Ok(())
}

#[tokio::test]
async fn chain_past_depth_limit_fails_with_path() {
    let registry = Arc::new(SkillSet::chain(12).registry());

    let err = DependencyResolver::new(registry)
        .resolve("s0", &ResolveOptions::default())
        .await
        .unwrap_err();

    match err {
        GraphError::DepthLimitExceeded { max_depth, path } => {
            assert_eq!(max_depth, 10);
            assert!(path.starts_with("s0 → s1"), "{}", path);
            assert!(path.ends_with("s11"), "{}", path);
        }
        other => panic!("expected depth error, got {:?}", other),
    }
}

#[tokio::test]
async fn custom_depth_limit() {
    let registry = Arc::new(SkillSet::chain(4).registry());
    let options = ResolveOptions::default().with_max_depth(2);

    let err = DependencyResolver::new(registry)
        .resolve("s0", &options)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::DepthLimitExceeded { max_depth: 2, .. }));
}

#[tokio::test]
async fn missing_dependency_names_its_parent() {
    let set = SkillSet::new().with(skill("app", "1.0.0", &["ghost"]));
    let registry = Arc::new(set.registry());

    let err = DependencyResolver::new(registry)
        .resolve("app", &ResolveOptions::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Skill not found in registry: ghost (required by app)"
    );
}

#[tokio::test]
async fn registry_failure_propagates() {
    let registry = Arc::new(
        SkillSet::diamond()
            .registry()
            .with_failure("db", "connection reset"),
    );

    let err = DependencyResolver::new(registry)
        .resolve("app", &ResolveOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Registry(_)));
    assert!(err.to_string().contains("connection reset"));
}
