use super::*;
use crate::lockfile::{self, LOCK_FILE_NAME};
use crate::registry::{InMemoryRegistry, SkillRecord};
use std::path::PathBuf;
use tempfile::TempDir;

fn skill(name: &str, deps: &[&str]) -> SkillRecord {
    SkillRecord::new(name, "1.0.0", &format!("ref-{}", name)).with_dependencies(deps.iter().copied())
}

fn diamond_with_service() -> Arc<InMemoryRegistry> {
    Arc::new(
        InMemoryRegistry::new()
            .with_skill(skill("A", &["B", "C", "service:vector-db"]))
            .with_skill(skill("B", &["D"]))
            .with_skill(skill("C", &["D", "service:vector-db"]))
            .with_skill(skill("D", &[])),
    )
}

#[tokio::test]
async fn test_plan_diamond() {
    let plan = plan_install(diamond_with_service(), None, "A", &ResolveOptions::default())
        .await
        .unwrap();

    assert_eq!(plan.order.first().map(String::as_str), Some("D"));
    assert_eq!(plan.order.last().map(String::as_str), Some("A"));
    assert_eq!(plan.order.len(), 4);
    assert_eq!(plan.to_install, plan.order);
    assert_eq!(plan.transitive_count, 3);
    assert_eq!(plan.external_services, vec!["service:vector-db".to_string()]);
    assert!(!plan.is_up_to_date());
}

#[tokio::test]
async fn test_service_advisory() {
    let plan = plan_install(diamond_with_service(), None, "A", &ResolveOptions::default())
        .await
        .unwrap();
    let advisory = plan.service_advisory().unwrap();
    assert!(advisory.contains("service:vector-db"));
    assert!(advisory.contains("never installed automatically"));

    let plain = Arc::new(InMemoryRegistry::new().with_skill(skill("solo", &[])));
    let plan = plan_install(plain, None, "solo", &ResolveOptions::default())
        .await
        .unwrap();
    assert!(plan.service_advisory().is_none());
    assert_eq!(plan.transitive_count, 0);
}

#[tokio::test]
async fn test_plan_skips_installed_skills() {
    let temp_dir = TempDir::new().unwrap();
    let install_root = temp_dir.path().join("skills");
    let lock_path = temp_dir.path().join(LOCK_FILE_NAME);

    let d = crate::graph::DependencyNode::new("D", "1.0.0", "ref-D", 0);
    lockfile::update(InstalledSkillRecord::from_node(&d, &install_root, true), &lock_path).unwrap();
    let lock = lockfile::read(&lock_path).unwrap();

    let plan = plan_install(
        diamond_with_service(),
        Some(&lock),
        "A",
        &ResolveOptions::default().skip_installed(true),
    )
    .await
    .unwrap();

    assert!(plan.order.contains(&"D".to_string()));
    assert!(!plan.to_install.contains(&"D".to_string()));
    assert_eq!(plan.to_install.len(), 3);
    assert_eq!(plan.tree.installed_count, 2);
}

#[tokio::test]
async fn test_plan_propagates_resolution_errors() {
    let registry = Arc::new(
        InMemoryRegistry::new()
            .with_skill(skill("A", &["B"]))
            .with_skill(skill("B", &["A"])),
    );
    let err = plan_install(registry, None, "A", &ResolveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::CircularDependency { .. }));

    let empty = Arc::new(InMemoryRegistry::new());
    let err = plan_install(empty, None, "nothing", &ResolveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));
}

#[tokio::test]
async fn test_records_follow_install_order() {
    let plan = plan_install(diamond_with_service(), None, "A", &ResolveOptions::default())
        .await
        .unwrap();
    let root = PathBuf::from("/srv/skills");
    let records = plan.records(&root);

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, plan.order.iter().map(String::as_str).collect::<Vec<_>>());

    let a = records.iter().find(|r| r.name == "A").unwrap();
    assert!(a.is_direct);
    assert_eq!(a.dependencies.len(), 2);
    assert!(records.iter().filter(|r| r.name != "A").all(|r| !r.is_direct));
}
