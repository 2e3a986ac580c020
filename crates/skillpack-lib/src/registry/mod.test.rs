use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_external_service_detection() {
    assert!(is_external_service("service:postgres"));
    assert!(!is_external_service("postgres"));
    assert!(!is_external_service("my-service:thing"));
}

#[test]
fn test_record_splits_dependencies() {
    let record = SkillRecord::new("web", "1.0.0", "bafy-web")
        .with_dependencies(["http", "service:redis", "json"]);

    let skills: Vec<&str> = record.skill_dependencies().collect();
    let services: Vec<&str> = record.external_services().collect();

    assert_eq!(skills, vec!["http", "json"]);
    assert_eq!(services, vec!["service:redis"]);
}

#[tokio::test]
async fn test_in_memory_fetch_and_count() {
    let registry = InMemoryRegistry::new().with_skill(SkillRecord::new("a", "1.0.0", "ref-a"));

    let found = registry.fetch("a").await.unwrap();
    assert_eq!(found.map(|r| r.version), Some("1.0.0".to_string()));

    let missing = registry.fetch("nope").await.unwrap();
    assert!(missing.is_none());

    assert_eq!(registry.lookup_count("a").await, 1);
    assert_eq!(registry.lookup_count("nope").await, 1);
    assert_eq!(registry.total_lookups().await, 2);
}

#[tokio::test]
async fn test_in_memory_failure_is_error_not_absence() {
    let registry = InMemoryRegistry::new().with_failure("flaky", "connection reset");

    let err = registry.fetch("flaky").await.unwrap_err();
    assert!(matches!(err, RegistryError::Backend { ref name, .. } if name == "flaky"));
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_index_file_registry_loads_records() {
    let temp_dir = TempDir::new().unwrap();
    let index = temp_dir.path().join("index.json");
    fs::write(
        &index,
        r#"[
  { "name": "a", "version": "1.0.0", "storageRef": "ref-a", "dependencies": ["b"] },
  { "name": "b", "version": "2.1.0", "storageRef": "ref-b" }
]"#,
    )
    .unwrap();

    let registry = IndexFileRegistry::load(&index).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.path(), index.as_path());

    let a = registry.fetch("a").await.unwrap().unwrap();
    assert_eq!(a.dependencies, vec!["b".to_string()]);

    let b = registry.fetch("b").await.unwrap().unwrap();
    assert!(b.dependencies.is_empty());
}

#[test]
fn test_index_file_registry_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = IndexFileRegistry::load(&temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RegistryError::Io { .. }));
}

#[test]
fn test_index_file_registry_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let index = temp_dir.path().join("index.json");
    fs::write(&index, "{ not json").unwrap();

    let err = IndexFileRegistry::load(&index).unwrap_err();
    assert!(matches!(err, RegistryError::Parse { .. }));
}

#[test]
fn test_index_file_registry_duplicate_keeps_last() {
    let temp_dir = TempDir::new().unwrap();
    let index = temp_dir.path().join("index.json");
    fs::write(
        &index,
        r#"[
  { "name": "a", "version": "1.0.0", "storageRef": "old" },
  { "name": "a", "version": "1.1.0", "storageRef": "new" }
]"#,
    )
    .unwrap();

    let registry = IndexFileRegistry::load(&index).unwrap();
    assert_eq!(registry.len(), 1);
}
