use super::*;
use crate::lockfile::LockFile;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write_index(dir: &Path) -> PathBuf {
    let index = json!([
        { "name": "app", "version": "1.0.0", "storageRef": "blob-app", "dependencies": ["auth", "db", "service:postgres"] },
        { "name": "auth", "version": "2.1.0", "storageRef": "blob-auth", "dependencies": ["util"] },
        { "name": "db", "version": "0.3.0", "storageRef": "blob-db", "dependencies": ["util"] },
        { "name": "util", "version": "1.2.3", "storageRef": "blob-util" },
        { "name": "loop-a", "version": "1.0.0", "storageRef": "blob-la", "dependencies": ["loop-b"] },
        { "name": "loop-b", "version": "1.0.0", "storageRef": "blob-lb", "dependencies": ["loop-a"] }
    ]);
    let path = dir.join("index.json");
    std::fs::write(&path, serde_json::to_string_pretty(&index).unwrap()).unwrap();
    path
}

fn test_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        install_dir: Some(dir.path().join("skills")),
        registry_index: Some(write_index(dir.path())),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_plan_lists_install_order() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let out = run_command(
        Commands::Plan {
            name: "app".to_string(),
            skip_installed: false,
            verbose: false,
        },
        &config,
        &StyleManager::plain(),
    )
    .await
    .unwrap();

    assert!(out.contains("Install plan for app (3 dependencies)"));
    let util = out.find("util").unwrap();
    let app = out.rfind("app 1.0.0").unwrap();
    assert!(util < app);
    assert!(out.contains("service:postgres"));
}

#[tokio::test]
async fn test_plan_reports_cycle() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let err = run_command(
        Commands::Plan {
            name: "loop-a".to_string(),
            skip_installed: false,
            verbose: false,
        },
        &config,
        &StyleManager::plain(),
    )
    .await
    .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("loop-a → loop-b → loop-a"), "{}", message);
}

#[tokio::test]
async fn test_plan_unknown_skill() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let err = run_command(
        Commands::Plan {
            name: "missing".to_string(),
            skip_installed: false,
            verbose: false,
        },
        &config,
        &StyleManager::plain(),
    )
    .await
    .unwrap_err();

    assert!(format!("{:#}", err).contains("missing"));
}

#[tokio::test]
async fn test_tree_renders_indentation() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let out = run_command(
        Commands::Tree {
            name: "app".to_string(),
        },
        &config,
        &StyleManager::plain(),
    )
    .await
    .unwrap();

    assert!(out.starts_with("app@1.0.0\n"));
    assert!(out.contains("\n  auth@2.1.0\n"));
    assert!(out.contains("\n    util@1.2.3\n"));
}

#[tokio::test]
async fn test_record_then_lock() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let styles = StyleManager::plain();

    let out = run_command(
        Commands::Record {
            name: "app".to_string(),
        },
        &config,
        &styles,
    )
    .await
    .unwrap();
    assert!(out.contains("Recorded 4 skills"));
    assert!(out.contains("service:postgres"));

    let lock_path = dir.path().join("skills-lock.json");
    let lock: LockFile =
        serde_json::from_str(&std::fs::read_to_string(&lock_path).unwrap()).unwrap();
    assert_eq!(lock.skills.len(), 4);
    assert!(lock.find("app").unwrap().is_direct);
    assert!(!lock.find("util").unwrap().is_direct);

    let again = run_command(
        Commands::Record {
            name: "app".to_string(),
        },
        &config,
        &styles,
    )
    .await
    .unwrap();
    assert!(again.contains("already up to date"));

    let listing = run_command(Commands::Lock, &config, &styles).await.unwrap();
    assert!(listing.contains("skills-lock.json"));
    assert!(listing.contains("app"));
}

#[tokio::test]
async fn test_lock_without_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let out = run_command(Commands::Lock, &config, &StyleManager::plain())
        .await
        .unwrap();

    assert!(out.contains("no skills recorded"));
    assert!(!dir.path().join("skills-lock.json").exists());
}

#[tokio::test]
async fn test_missing_registry_index() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        install_dir: Some(dir.path().join("skills")),
        ..AppConfig::default()
    };

    let err = run_command(
        Commands::Tree {
            name: "app".to_string(),
        },
        &config,
        &StyleManager::plain(),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("--registry-index"));
}

#[tokio::test]
async fn test_lock_and_version_need_no_registry() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        install_dir: Some(dir.path().join("skills")),
        registry_index: Some(dir.path().join("absent-index.json")),
        ..AppConfig::default()
    };
    let styles = StyleManager::plain();

    assert!(run_command(Commands::Lock, &config, &styles).await.is_ok());
    assert!(run_command(Commands::Version, &config, &styles).await.is_ok());

    let err = run_command(Commands::Tree { name: "app".to_string() }, &config, &styles)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("absent-index.json"));
}

#[tokio::test]
async fn test_version() {
    let out = run_command(Commands::Version, &AppConfig::default(), &StyleManager::plain())
        .await
        .unwrap();
    assert!(out.starts_with("skillpack "));
}
