//! Lock file management
//!
//! The lock file records every installed skill and the shape of the
//! dependency tree it was installed with. It lives beside the skills
//! directory: for an install root `<X>/skills/` the lock file is
//! `<X>/skills-lock.json`.
//!
//! Reads are forgiving. A missing or unparsable lock file yields a fresh
//! empty one so a damaged file never blocks installs. Writes are atomic:
//! content goes to `<path>.tmp` and is renamed over the target.

use crate::graph::DependencyNode;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, trace};

/// Lock file format version written by this crate
pub const LOCKFILE_VERSION: u32 = 1;

/// File name of the lock file, placed beside the install root
pub const LOCK_FILE_NAME: &str = "skills-lock.json";

/// Directory name assumed for the install root when deriving it from a lock path
pub const SKILLS_DIR_NAME: &str = "skills";

/// Serializes read-merge-write cycles within this process
static UPDATE_LOCK: Mutex<()> = Mutex::new(());

/// Lock file errors
#[derive(Debug, Error)]
pub enum LockFileError {
    #[error("Lock file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize lock file: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },

    #[error("Could not determine the home directory to expand '{path}'")]
    HomeDirUnavailable { path: PathBuf },
}

/// One installed skill and the dependencies it was installed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledSkillRecord {
    pub name: String,
    pub version: String,
    pub storage_ref: String,
    /// Epoch milliseconds
    pub installed_at: u64,
    pub install_path: PathBuf,
    #[serde(default)]
    pub dependencies: Vec<InstalledSkillRecord>,
    /// Requested by the user rather than pulled in transitively
    #[serde(default)]
    pub is_direct: bool,
}

impl InstalledSkillRecord {
    /// Build a record mirroring a resolved subtree
    ///
    /// Nested dependency records are always transitive.
    pub fn from_node(node: &DependencyNode, install_root: &Path, is_direct: bool) -> Self {
        let installed_at = now_millis();
        Self::from_node_at(node, install_root, is_direct, installed_at)
    }

    fn from_node_at(
        node: &DependencyNode,
        install_root: &Path,
        is_direct: bool,
        installed_at: u64,
    ) -> Self {
        Self {
            name: node.name.clone(),
            version: node.version.clone(),
            storage_ref: node.storage_ref.clone(),
            installed_at,
            install_path: install_root.join(&node.name),
            dependencies: node
                .children
                .iter()
                .map(|child| Self::from_node_at(child, install_root, false, installed_at))
                .collect(),
            is_direct,
        }
    }
}

/// Durable record of installed skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFile {
    /// Kept as read; files from newer versions pass through unchanged
    pub lockfile_version: u32,
    /// Epoch milliseconds of the last merge
    pub generated_at: u64,
    pub skills: Vec<InstalledSkillRecord>,
    pub install_location: PathBuf,
}

impl LockFile {
    /// Fresh lock file with no skills
    pub fn empty(install_location: &Path) -> Self {
        Self {
            lockfile_version: LOCKFILE_VERSION,
            generated_at: now_millis(),
            skills: Vec::new(),
            install_location: install_location.to_path_buf(),
        }
    }

    /// Top-level record for `name`
    pub fn find(&self, name: &str) -> Option<&InstalledSkillRecord> {
        self.skills.iter().find(|record| record.name == name)
    }

    /// Whether `name` is recorded at `version`, at any nesting level
    pub fn is_installed(&self, name: &str, version: &str) -> bool {
        self.installed_pairs()
            .iter()
            .any(|(n, v)| n == name && v == version)
    }

    /// Names of top-level records, in file order
    pub fn installed_names(&self) -> Vec<&str> {
        self.skills.iter().map(|record| record.name.as_str()).collect()
    }

    /// Every (name, version) pair recorded, nested dependencies included
    pub fn installed_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut stack: Vec<&InstalledSkillRecord> = self.skills.iter().collect();
        while let Some(record) = stack.pop() {
            let pair = (record.name.clone(), record.version.clone());
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
            stack.extend(record.dependencies.iter());
        }
        pairs
    }
}

/// Read the lock file at `path`
///
/// Missing and unparsable files both yield an empty lock file whose install
/// location is derived from `path`. Other I/O failures are errors.
pub fn read(path: &Path) -> Result<LockFile, LockFileError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No lock file at {}, starting empty", path.display());
            return Ok(LockFile::empty(&install_root_for(path)));
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            debug!("Lock file {} is not UTF-8, starting empty", path.display());
            return Ok(LockFile::empty(&install_root_for(path)));
        }
        Err(e) => {
            return Err(LockFileError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    match serde_json::from_str::<LockFile>(&content) {
        Ok(lock) => {
            trace!(
                "Read lock file {} (version {}, {} skills)",
                path.display(),
                lock.lockfile_version,
                lock.skills.len()
            );
            Ok(lock)
        }
        Err(e) => {
            debug!("Lock file {} is unreadable ({}), starting empty", path.display(), e);
            Ok(LockFile::empty(&install_root_for(path)))
        }
    }
}

/// Atomically write `lock` to `path`
///
/// Parent directories are created as needed. The temporary `<path>.tmp`
/// never survives this call.
pub fn write(lock: &LockFile, path: &Path) -> Result<(), LockFileError> {
    let mut content = serde_json::to_string_pretty(lock)?;
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LockFileError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp = TempFileGuard::new(temp_path_for(path));
    let io_err = |source| LockFileError::Io {
        path: temp.path.clone(),
        source,
    };

    let mut file = fs::File::create(&temp.path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;
    drop(file);

    fs::rename(&temp.path, path).map_err(|e| LockFileError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    temp.disarm();

    trace!("Wrote lock file {} ({} skills)", path.display(), lock.skills.len());
    Ok(())
}

/// Merge `records` into `existing`, returning a new lock file
///
/// A record replaces the top-level entry with the same name in place, or is
/// appended. The generation timestamp is refreshed; `existing` is untouched.
pub fn merge(existing: &LockFile, records: &[InstalledSkillRecord]) -> LockFile {
    let mut merged = existing.clone();

    for record in records {
        match merged.skills.iter_mut().find(|r| r.name == record.name) {
            Some(slot) => *slot = record.clone(),
            None => merged.skills.push(record.clone()),
        }
    }

    merged.generated_at = now_millis();
    merged
}

/// Read, merge `record`, and write back in one step
///
/// Serialized against other updates in this process. Separate processes
/// can still race; the last rename wins.
pub fn update(record: InstalledSkillRecord, path: &Path) -> Result<LockFile, LockFileError> {
    let _guard = UPDATE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let current = read(path)?;
    let merged = merge(&current, std::slice::from_ref(&record));
    write(&merged, path)?;

    debug!(
        "Recorded {}@{} in {}",
        record.name,
        record.version,
        path.display()
    );
    Ok(merged)
}

/// Lock file path for an install root: `<X>/skills/` maps to `<X>/skills-lock.json`
pub fn lock_file_path(install_root: &Path) -> Result<PathBuf, LockFileError> {
    let root = expand_home(install_root)?;
    let parent = root.parent().unwrap_or(&root);
    Ok(parent.join(LOCK_FILE_NAME))
}

/// Inverse of [`lock_file_path`], assuming the conventional `skills` directory
pub fn install_root_for(lock_path: &Path) -> PathBuf {
    lock_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(SKILLS_DIR_NAME)
}

/// Expand a leading `~` to the invoking user's home directory
pub fn expand_home(path: &Path) -> Result<PathBuf, LockFileError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    let base = BaseDirs::new().ok_or_else(|| LockFileError::HomeDirUnavailable {
        path: path.to_path_buf(),
    })?;
    Ok(base.home_dir().join(rest))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Removes the temporary file on drop unless disarmed
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(epoch_millis)
        .unwrap_or(0)
}

/// Millisecond count, saturating at `u64::MAX`
fn epoch_millis(since_epoch: Duration) -> u64 {
    u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
