use super::*;
use std::path::PathBuf;

fn tree() -> DependencyTree {
    let root = DependencyNode::new("app", "1.0.0", "ref-app", 0)
        .with_child(DependencyNode::new("lib", "0.3.0", "ref-lib", 1).mark_installed())
        .with_child(DependencyNode::new("util", "2.0.0", "ref-util", 1));
    DependencyTree::new(root, vec!["service:redis".to_string()])
}

fn plan() -> InstallPlan {
    InstallPlan {
        root: "app".to_string(),
        order: vec!["lib".to_string(), "util".to_string(), "app".to_string()],
        to_install: vec!["util".to_string(), "app".to_string()],
        transitive_count: 2,
        external_services: vec!["service:redis".to_string()],
        tree: tree(),
    }
}

#[test]
fn test_render_plan_lists_install_order() {
    let text = render_plan(&plan(), &StyleManager::plain());

    assert!(text.contains("Install plan for app (2 dependencies)"));
    assert!(text.contains(" 1. util 2.0.0"));
    assert!(text.contains(" 2. app 1.0.0"));
    assert!(text.contains("1 already installed"));
    assert!(text.contains("service:redis"));
}

#[test]
fn test_render_plan_up_to_date() {
    let mut plan = plan();
    plan.to_install.clear();
    plan.external_services.clear();

    let text = render_plan(&plan, &StyleManager::plain());
    assert!(text.contains("Everything is already installed"));
    assert!(!text.contains("external services"));
}

#[test]
fn test_render_tree_indents_by_depth() {
    let text = render_tree(&tree(), &StyleManager::plain());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "app@1.0.0");
    assert_eq!(lines[1], "  lib@0.3.0 (installed)");
    assert_eq!(lines[2], "  util@2.0.0");
    assert!(text.contains("3 nodes, max depth 1, 1 already installed"));
    assert!(text.contains("external service: service:redis"));
}

#[test]
fn test_render_empty_lock() {
    let lock = LockFile::empty(&PathBuf::from("/x/skills"));
    let text = render_lock(&lock, &PathBuf::from("/x/skills-lock.json"), &StyleManager::plain());

    assert!(text.contains("Lock file: /x/skills-lock.json"));
    assert!(text.contains("install location: /x/skills"));
    assert!(text.contains("no skills recorded"));
}

#[test]
fn test_render_lock_nests_dependencies() {
    let node = DependencyNode::new("app", "1.0.0", "ref-app", 0)
        .with_child(DependencyNode::new("lib", "0.3.0", "ref-lib", 1));
    let record = InstalledSkillRecord::from_node(&node, &PathBuf::from("/x/skills"), true);
    let mut lock = LockFile::empty(&PathBuf::from("/x/skills"));
    lock.skills.push(record);

    let text = render_lock(&lock, &PathBuf::from("/x/skills-lock.json"), &StyleManager::plain());
    assert!(text.contains("  app@1.0.0 [direct] ref-app"));
    assert!(text.contains("    lib@0.3.0 [transitive] ref-lib"));
}
