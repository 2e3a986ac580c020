//! Registry fixtures for workflow tests
//!
//! A [`SkillSet`] describes a small published catalogue once and can be
//! materialized either as an [`InMemoryRegistry`] (for counting lookups) or
//! as a JSON index file (for driving the CLI commands).

use anyhow::Result;
use skillpack_lib::registry::{InMemoryRegistry, SkillRecord};
use std::path::Path;

/// Shorthand for a record with a storage reference derived from its name
pub fn skill(name: &str, version: &str, dependencies: &[&str]) -> SkillRecord {
    SkillRecord::new(name, version, &format!("sha256:{}-{}", name, version))
        .with_dependencies(dependencies.iter().copied())
}

/// Ordered collection of published skill records
#[derive(Debug, Clone, Default)]
pub struct SkillSet {
    records: Vec<SkillRecord>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record
    pub fn with(mut self, record: SkillRecord) -> Self {
        self.records.push(record);
        self
    }

    /// `app` needs `auth` and `db`, which both need `util`; `app` also
    /// references a database service
    pub fn diamond() -> Self {
        Self::new()
            .with(skill("app", "1.0.0", &["auth", "db", "service:postgres"]))
            .with(skill("auth", "2.1.0", &["util"]))
            .with(skill("db", "0.3.0", &["util", "service:postgres"]))
            .with(skill("util", "1.2.3", &[]))
    }

    /// Linear chain `s0 → s1 → … → s{len-1}`
    pub fn chain(len: usize) -> Self {
        (0..len).fold(Self::new(), |set, i| {
            let name = format!("s{}", i);
            let next = format!("s{}", i + 1);
            let deps: Vec<&str> = if i + 1 < len { vec![next.as_str()] } else { vec![] };
            set.with(skill(&name, "1.0.0", &deps))
        })
    }

    /// `a → b → c → a`
    pub fn triangle() -> Self {
        Self::new()
            .with(skill("a", "1.0.0", &["b"]))
            .with(skill("b", "1.0.0", &["c"]))
            .with(skill("c", "1.0.0", &["a"]))
    }

    pub fn records(&self) -> &[SkillRecord] {
        &self.records
    }

    /// Publish every record into a fresh in-memory registry
    pub fn registry(&self) -> InMemoryRegistry {
        self.records
            .iter()
            .cloned()
            .fold(InMemoryRegistry::new(), InMemoryRegistry::with_skill)
    }

    /// Write the records as a registry index file
    pub fn write_index(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(&self.records)?)?;
        Ok(())
    }
}
