//! Recording plans into the lock file

use anyhow::Result;
use skillpack_lib::application::{Commands, run_command};
use skillpack_lib::display::StyleManager;
use skillpack_lib::graph::{DependencyNode, ResolveOptions};
use skillpack_lib::lockfile::{self, InstalledSkillRecord};
use skillpack_lib::plan::plan_install;
use skillpack_tests::{SkillSet, TestEnvironment, skill};
use std::sync::Arc;

fn record_cmd(name: &str) -> Commands {
    Commands::Record {
        name: name.to_string(),
    }
}

#[tokio::test]
async fn record_writes_every_planned_skill() -> Result<()> {
    let env = TestEnvironment::new(&SkillSet::diamond())?;
    let config = env.config()?;

    run_command(record_cmd("app"), &config, &StyleManager::plain()).await?;

    let lock = env.read_lock()?;
    assert_eq!(lock.lockfile_version, lockfile::LOCKFILE_VERSION);
    assert_eq!(lock.install_location, env.install_root);
    assert_eq!(lock.installed_names(), vec!["util", "auth", "db", "app"]);

    let app = lock.find("app").unwrap();
    assert!(app.is_direct);
    assert_eq!(app.install_path, env.install_root.join("app"));
    assert_eq!(app.dependencies.len(), 2);
    assert!(!env.temp_dir.path().join("skills-lock.json.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn recorded_skills_are_skipped_on_next_plan() -> Result<()> {
    let set = SkillSet::diamond().with(skill("dashboard", "0.1.0", &["auth", "charts"]))
        .with(skill("charts", "3.0.0", &[]));
    let env = TestEnvironment::new(&set)?;
    let config = env.config()?;

    run_command(record_cmd("app"), &config, &StyleManager::plain()).await?;

    let lock = env.read_lock()?;
    let options = ResolveOptions::default().skip_installed(true);
    let plan = plan_install(Arc::new(set.registry()), Some(&lock), "dashboard", &options).await?;

    assert_eq!(plan.order, vec!["auth", "charts", "dashboard"]);
    assert_eq!(plan.to_install, vec!["charts", "dashboard"]);
    assert_eq!(plan.tree.installed_count, 1);
    Ok(())
}

#[tokio::test]
async fn corrupt_lock_file_is_replaced() -> Result<()> {
    let env = TestEnvironment::new(&SkillSet::diamond())?;
    let config = env.config()?;
    env.write_raw_lock("{ this is not json")?;

    assert!(env.read_lock()?.skills.is_empty());

    run_command(record_cmd("util"), &config, &StyleManager::plain()).await?;

    let lock = env.read_lock()?;
    assert_eq!(lock.installed_names(), vec!["util"]);
    Ok(())
}

#[test]
fn concurrent_updates_in_one_process_all_land() -> Result<()> {
    let env = TestEnvironment::new(&SkillSet::new())?;
    let path = env.lock_path();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let path = path.clone();
            let root = env.install_root.clone();
            std::thread::spawn(move || {
                let node = DependencyNode::new(&format!("skill-{}", i), "1.0.0", "ref", 0);
                let record = InstalledSkillRecord::from_node(&node, &root, true);
                lockfile::update(record, &path)
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("update thread panicked")?;
    }

    let lock = env.read_lock()?;
    assert_eq!(lock.skills.len(), 8);
    Ok(())
}
