//! Registry lookup abstraction
//!
//! The resolver only ever asks one question of a registry: "given a skill
//! name, what is its record?". This module defines that seam as the
//! [`SkillRegistry`] trait together with two local implementations: an
//! in-memory map for tests and embedding, and a JSON index file used by the
//! CLI as an offline stand-in for the network registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

/// Prefix marking a dependency entry as an external-service reference
///
/// Entries such as `service:postgres` name a companion service the skill
/// expects to exist. They are reported to the user and never resolved.
pub const EXTERNAL_SERVICE_PREFIX: &str = "service:";

/// Whether a declared dependency entry is an external-service reference
pub fn is_external_service(dependency: &str) -> bool {
    dependency.starts_with(EXTERNAL_SERVICE_PREFIX)
}

/// Registry errors
///
/// A missing skill is not an error at this layer; `fetch` reports it as
/// `Ok(None)` and the resolver decides what absence means.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read registry index {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse registry index {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Registry lookup for '{name}' failed: {reason}")]
    Backend { name: String, reason: String },
}

/// Metadata record for a published skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    pub name: String,
    pub version: String,
    /// Opaque content-address of the skill archive
    pub storage_ref: String,
    /// Declared dependency names, possibly including external-service references
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl SkillRecord {
    /// Create a record without dependencies
    pub fn new(name: &str, version: &str, storage_ref: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            storage_ref: storage_ref.to_string(),
            dependencies: Vec::new(),
        }
    }

    /// Append declared dependencies
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .extend(dependencies.into_iter().map(Into::into));
        self
    }

    /// Dependencies that name installable skills
    pub fn skill_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .map(String::as_str)
            .filter(|dep| !is_external_service(dep))
    }

    /// Dependencies that reference external services
    pub fn external_services(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .map(String::as_str)
            .filter(|dep| is_external_service(dep))
    }
}

/// Name-based skill lookup
pub trait SkillRegistry: Send + Sync {
    /// Fetch the record published under `name`
    ///
    /// Returns `Ok(None)` when the registry has no such skill. Any other
    /// failure is an error.
    fn fetch(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<SkillRecord>, RegistryError>> + Send;
}

/// In-memory registry with per-name lookup counters
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    records: HashMap<String, SkillRecord>,
    failures: HashMap<String, String>,
    lookups: Mutex<HashMap<String, usize>>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a record, replacing any record with the same name
    pub fn with_skill(mut self, record: SkillRecord) -> Self {
        self.insert(record);
        self
    }

    /// Make lookups of `name` fail with a backend error
    pub fn with_failure(mut self, name: &str, reason: &str) -> Self {
        self.failures.insert(name.to_string(), reason.to_string());
        self
    }

    /// Publish a record in place
    pub fn insert(&mut self, record: SkillRecord) {
        self.records.insert(record.name.clone(), record);
    }

    /// Number of published records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record is published
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many times `name` has been looked up
    pub async fn lookup_count(&self, name: &str) -> usize {
        self.lookups.lock().await.get(name).copied().unwrap_or(0)
    }

    /// Total lookups across all names
    pub async fn total_lookups(&self) -> usize {
        self.lookups.lock().await.values().sum()
    }
}

impl SkillRegistry for InMemoryRegistry {
    async fn fetch(&self, name: &str) -> Result<Option<SkillRecord>, RegistryError> {
        *self.lookups.lock().await.entry(name.to_string()).or_insert(0) += 1;

        if let Some(reason) = self.failures.get(name) {
            return Err(RegistryError::Backend {
                name: name.to_string(),
                reason: reason.clone(),
            });
        }

        trace!("In-memory registry lookup: {}", name);
        Ok(self.records.get(name).cloned())
    }
}

/// Registry backed by a JSON index file
///
/// The index is a JSON array of [`SkillRecord`] objects. It is read once at
/// construction; later edits to the file are not observed.
#[derive(Debug)]
pub struct IndexFileRegistry {
    path: PathBuf,
    inner: InMemoryRegistry,
}

impl IndexFileRegistry {
    /// Load an index file
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        debug!("Loading registry index: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let records: Vec<SkillRecord> =
            serde_json::from_str(&content).map_err(|e| RegistryError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut inner = InMemoryRegistry::new();
        for record in records {
            if inner.records.contains_key(&record.name) {
                warn!(
                    "Registry index {} lists '{}' more than once; keeping the last entry",
                    path.display(),
                    record.name
                );
            }
            inner.insert(record);
        }

        debug!("Registry index loaded with {} skills", inner.len());

        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Path the index was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of skills in the index
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SkillRegistry for IndexFileRegistry {
    async fn fetch(&self, name: &str) -> Result<Option<SkillRecord>, RegistryError> {
        self.inner.fetch(name).await
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
