// Tests for lock file persistence

use super::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn record(name: &str, version: &str) -> InstalledSkillRecord {
    InstalledSkillRecord {
        name: name.to_string(),
        version: version.to_string(),
        storage_ref: format!("ref-{}-{}", name, version),
        installed_at: 1_700_000_000_000,
        install_path: PathBuf::from(format!("/opt/agent/skills/{}", name)),
        dependencies: Vec::new(),
        is_direct: true,
    }
}

fn sample_lock() -> LockFile {
    let mut parent = record("web", "1.2.0");
    let mut child = record("http", "0.4.1");
    child.is_direct = false;
    child.dependencies.push(InstalledSkillRecord {
        is_direct: false,
        ..record("bytes", "1.0.0")
    });
    parent.dependencies.push(child);

    LockFile {
        lockfile_version: LOCKFILE_VERSION,
        generated_at: 1_700_000_000_123,
        skills: vec![parent, record("cli", "2.0.0")],
        install_location: PathBuf::from("/opt/agent/skills"),
    }
}

/// Lock path inside a temp install tree: <tmp>/skills-lock.json
fn lock_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join(LOCK_FILE_NAME)
}

// ============================================================================
// Read
// ============================================================================

#[test]
fn test_read_missing_returns_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);

    let lock = read(&path).unwrap();

    assert_eq!(lock.lockfile_version, 1);
    assert!(lock.skills.is_empty());
    assert_eq!(lock.install_location, temp_dir.path().join("skills"));
    assert!(!path.exists(), "read must not create the file");
}

#[test]
fn test_read_corrupt_returns_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    fs::write(&path, "{ \"lockfileVersion\": 1, \"skills\": [").unwrap();

    let lock = read(&path).unwrap();
    assert!(lock.skills.is_empty());
    assert_eq!(lock.lockfile_version, LOCKFILE_VERSION);
}

#[test]
fn test_read_non_utf8_returns_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    fs::write(&path, [0xff, 0xfe, 0x00, 0x81]).unwrap();

    assert!(read(&path).unwrap().skills.is_empty());
}

#[test]
fn test_read_directory_is_an_error() {
    // A directory at the lock path is a genuine filesystem problem
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    fs::create_dir_all(&path).unwrap();

    assert!(matches!(read(&path), Err(LockFileError::Io { .. })));
}

#[test]
fn test_future_version_passes_through() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    fs::write(
        &path,
        r#"{
  "lockfileVersion": 7,
  "generatedAt": 42,
  "skills": [],
  "installLocation": "/somewhere/skills"
}
"#,
    )
    .unwrap();

    let lock = read(&path).unwrap();
    assert_eq!(lock.lockfile_version, 7);

    write(&lock, &path).unwrap();
    assert_eq!(read(&path).unwrap().lockfile_version, 7);
}

// ============================================================================
// Write
// ============================================================================

#[test]
fn test_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    let lock = sample_lock();

    write(&lock, &path).unwrap();
    assert_eq!(read(&path).unwrap(), lock);
}

#[test]
fn test_write_format_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    let lock = LockFile {
        lockfile_version: 1,
        generated_at: 5,
        skills: vec![],
        install_location: PathBuf::from("/x/skills"),
    };

    write(&lock, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert_eq!(
        text,
        "{\n  \"lockfileVersion\": 1,\n  \"generatedAt\": 5,\n  \"skills\": [],\n  \"installLocation\": \"/x/skills\"\n}\n"
    );
}

#[test]
fn test_write_uses_camel_case_record_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    write(&sample_lock(), &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    for field in ["storageRef", "installedAt", "installPath", "isDirect", "dependencies"] {
        assert!(text.contains(field), "missing {} in {}", field, text);
    }
}

#[test]
fn test_write_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/deeper").join(LOCK_FILE_NAME);

    write(&sample_lock(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_write_leaves_no_temp_file_on_success() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);

    write(&sample_lock(), &path).unwrap();
    write(&sample_lock(), &path).unwrap();

    assert!(!temp_path_for(&path).exists());
}

#[test]
fn test_write_leaves_no_temp_file_on_failure() {
    // Renaming a file over a non-empty directory fails
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    fs::create_dir_all(path.join("occupied")).unwrap();

    let result = write(&sample_lock(), &path);

    assert!(matches!(result, Err(LockFileError::Io { .. })));
    assert!(!temp_path_for(&path).exists());
}

#[test]
fn test_temp_path_is_sibling() {
    let path = Path::new("/a/b/skills-lock.json");
    assert_eq!(temp_path_for(path), PathBuf::from("/a/b/skills-lock.json.tmp"));
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_appends_new_names() {
    let existing = sample_lock();
    let merged = merge(&existing, &[record("fresh", "0.1.0")]);

    assert_eq!(merged.installed_names(), vec!["web", "cli", "fresh"]);
}

#[test]
fn test_merge_replaces_same_name_in_place() {
    let existing = sample_lock();
    let merged = merge(&existing, &[record("web", "1.3.0")]);

    assert_eq!(merged.installed_names(), vec!["web", "cli"]);
    assert_eq!(merged.find("web").unwrap().version, "1.3.0");
    assert!(merged.find("web").unwrap().dependencies.is_empty());
}

#[test]
fn test_merge_does_not_mutate_input() {
    let existing = sample_lock();
    let snapshot = existing.clone();

    let _ = merge(&existing, &[record("web", "9.9.9"), record("new", "1.0.0")]);

    assert_eq!(existing, snapshot);
}

#[test]
fn test_merge_is_repeatable() {
    let existing = sample_lock();
    let records = [record("a", "1.0.0"), record("cli", "2.1.0")];

    let first = merge(&existing, &records);
    let second = merge(&existing, &records);

    assert_eq!(first.skills, second.skills);
}

#[test]
fn test_merge_refreshes_timestamp() {
    let existing = sample_lock();
    let merged = merge(&existing, &[]);
    assert!(merged.generated_at > existing.generated_at);
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_update_creates_and_extends_lock_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);

    update(record("one", "1.0.0"), &path).unwrap();
    let lock = update(record("two", "1.0.0"), &path).unwrap();

    assert_eq!(lock.installed_names(), vec!["one", "two"]);
    assert_eq!(read(&path).unwrap(), lock);
    assert_eq!(lock.install_location, temp_dir.path().join("skills"));
}

#[test]
fn test_update_recovers_from_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = lock_path(&temp_dir);
    fs::write(&path, "garbage").unwrap();

    let lock = update(record("one", "1.0.0"), &path).unwrap();
    assert_eq!(lock.installed_names(), vec!["one"]);
}

// ============================================================================
// Queries and Records
// ============================================================================

#[test]
fn test_installed_pairs_include_nested() {
    let lock = sample_lock();

    assert!(lock.is_installed("bytes", "1.0.0"));
    assert!(lock.is_installed("http", "0.4.1"));
    assert!(!lock.is_installed("http", "0.5.0"));
    assert_eq!(lock.installed_pairs().len(), 4);
}

#[test]
fn test_record_from_node_mirrors_tree() {
    let node = DependencyNode::new("app", "1.0.0", "ref-app", 0)
        .with_child(DependencyNode::new("lib", "0.2.0", "ref-lib", 1));
    let root = Path::new("/home/me/skills");

    let record = InstalledSkillRecord::from_node(&node, root, true);

    assert!(record.is_direct);
    assert_eq!(record.install_path, root.join("app"));
    assert_eq!(record.dependencies.len(), 1);
    let lib = &record.dependencies[0];
    assert!(!lib.is_direct);
    assert_eq!(lib.storage_ref, "ref-lib");
    assert_eq!(lib.install_path, root.join("lib"));
    assert_eq!(lib.installed_at, record.installed_at);
}

// ============================================================================
// Paths
// ============================================================================

#[test]
fn test_lock_file_path_is_sibling_of_install_root() {
    assert_eq!(
        lock_file_path(Path::new("/opt/agent/skills/")).unwrap(),
        PathBuf::from("/opt/agent/skills-lock.json")
    );
    assert_eq!(
        lock_file_path(Path::new("/opt/agent/skills")).unwrap(),
        PathBuf::from("/opt/agent/skills-lock.json")
    );
}

#[test]
fn test_install_root_for_inverts_lock_file_path() {
    let root = Path::new("/opt/agent/skills");
    let lock = lock_file_path(root).unwrap();
    assert_eq!(install_root_for(&lock), root);
}

#[test]
fn test_expand_home() {
    let plain = Path::new("/abs/skills");
    assert_eq!(expand_home(plain).unwrap(), plain);

    if let Some(base) = BaseDirs::new() {
        let expanded = expand_home(Path::new("~/.skillpack/skills")).unwrap();
        assert_eq!(expanded, base.home_dir().join(".skillpack/skills"));

        let lock = lock_file_path(Path::new("~/.skillpack/skills")).unwrap();
        assert_eq!(lock, base.home_dir().join(".skillpack").join(LOCK_FILE_NAME));
    }
}

#[test]
fn test_tilde_inside_name_is_not_expanded() {
    let path = Path::new("~weird/skills");
    assert_eq!(expand_home(path).unwrap(), path);
}

#[test]
fn test_epoch_millis_saturates() {
    assert_eq!(epoch_millis(Duration::from_millis(1_700_000_000_123)), 1_700_000_000_123);
    assert_eq!(epoch_millis(Duration::MAX), u64::MAX);
}
