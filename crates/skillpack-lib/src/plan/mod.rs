//! Install planning
//!
//! Runs the full resolve → detect → sort pipeline for a requested skill and
//! packages the outcome the install command acts on: the install order,
//! the dependency count, and any external services the user must install
//! by hand.

use crate::graph::{
    DependencyResolver, DependencyTree, GraphError, ResolveOptions, detect_circular,
    topological_sort,
};
use crate::lockfile::{InstalledSkillRecord, LockFile};
use crate::registry::SkillRegistry;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Outcome of planning an install
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Requested skill
    pub root: String,
    /// Every skill in dependency order, root last
    pub order: Vec<String>,
    /// `order` minus skills already installed at the resolved version
    pub to_install: Vec<String>,
    /// Distinct dependencies of the root
    pub transitive_count: usize,
    /// External-service references, de-duplicated
    pub external_services: Vec<String>,
    pub tree: DependencyTree,
}

impl InstallPlan {
    /// Whether everything is already installed
    pub fn is_up_to_date(&self) -> bool {
        self.to_install.is_empty()
    }

    /// Lock file records for the skills this plan installs, in install order
    pub fn records(&self, install_root: &Path) -> Vec<InstalledSkillRecord> {
        self.to_install
            .iter()
            .filter_map(|name| self.tree.find(name))
            .map(|node| InstalledSkillRecord::from_node(node, install_root, node.name == self.root))
            .collect()
    }

    /// Advisory text for external services, if any were referenced
    pub fn service_advisory(&self) -> Option<String> {
        if self.external_services.is_empty() {
            return None;
        }
        Some(format!(
            "This skill references external services that must be installed separately: {}. \
             They are never installed automatically.",
            self.external_services.join(", ")
        ))
    }
}

/// Plan the install of `root`
///
/// The lock file, when given, supplies already-installed skills so that
/// `options.skip_already_installed` can prune them.
///
/// # Errors
///
/// Any [`GraphError`] from resolution, a [`GraphError::CircularDependency`]
/// for the first cycle the detector reports, or a
/// [`GraphError::CycleDetected`] from ordering.
pub async fn plan_install<R>(
    registry: Arc<R>,
    lock: Option<&LockFile>,
    root: &str,
    options: &ResolveOptions,
) -> Result<InstallPlan, GraphError>
where
    R: SkillRegistry,
{
    let installed = lock.map(LockFile::installed_pairs).unwrap_or_default();
    let resolver = DependencyResolver::new(registry).with_installed(installed);

    let tree = resolver.resolve(root, options).await?;

    if let Some(cycle) = detect_circular(&tree).into_iter().next() {
        return Err(GraphError::CircularDependency {
            cycle: cycle.description,
        });
    }

    let order = topological_sort(&tree)?;

    let installed_names: HashSet<&str> = tree
        .flattened()
        .filter(|node| node.installed)
        .map(|node| node.name.as_str())
        .collect();
    let to_install: Vec<String> = order
        .iter()
        .filter(|name| !installed_names.contains(name.as_str()))
        .cloned()
        .collect();

    let transitive_count = order.len().saturating_sub(1);

    info!(
        "Planned {}: {} to install, {} dependencies, {} external services",
        root,
        to_install.len(),
        transitive_count,
        tree.external_services.len()
    );

    Ok(InstallPlan {
        root: root.to_string(),
        order,
        to_install,
        transitive_count,
        external_services: tree.external_services.clone(),
        tree,
    })
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
