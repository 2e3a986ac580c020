//! Hermetic environment for workflow tests
//!
//! Everything lives under one temporary directory: the registry index, the
//! `skills/` install root and the lock file beside it.

use crate::fixtures::SkillSet;
use anyhow::Result;
use skillpack_lib::application::AppConfig;
use skillpack_lib::lockfile::{self, LockFile};
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated install root plus registry index
pub struct TestEnvironment {
    /// Removed on drop
    pub temp_dir: TempDir,
    pub install_root: PathBuf,
    pub index_path: PathBuf,
}

impl TestEnvironment {
    /// Create an environment publishing `skills`
    pub fn new(skills: &SkillSet) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let install_root = temp_dir.path().join("skills");
        let index_path = temp_dir.path().join("registry-index.json");

        skills.write_index(&index_path)?;

        Ok(Self {
            temp_dir,
            install_root,
            index_path,
        })
    }

    /// Validated config pointing at this environment
    pub fn config(&self) -> Result<AppConfig> {
        let cli = AppConfig {
            install_dir: Some(self.install_root.clone()),
            registry_index: Some(self.index_path.clone()),
            ..AppConfig::default()
        };
        Ok(AppConfig::from_cli(cli)?)
    }

    /// Lock file location for the install root
    pub fn lock_path(&self) -> PathBuf {
        self.temp_dir.path().join(lockfile::LOCK_FILE_NAME)
    }

    /// Current lock file contents, empty if absent
    pub fn read_lock(&self) -> Result<LockFile> {
        Ok(lockfile::read(&self.lock_path())?)
    }

    /// Overwrite the lock file with raw bytes
    pub fn write_raw_lock(&self, content: &str) -> Result<()> {
        std::fs::write(self.lock_path(), content)?;
        Ok(())
    }
}
