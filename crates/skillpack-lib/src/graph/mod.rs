//! # Graph Module
//!
//! Dependency resolution and install ordering for skills.
//!
//! ## Modules
//!
//! - [`tree`] - Resolved dependency tree (owned value nodes, duplicates kept)
//! - [`resolver`] - Depth-first registry walk producing a [`DependencyTree`]
//! - [`cycles`] - Three-color cycle detection over a resolved tree
//! - [`order`] - Kahn topological sort producing the install order
//!
//! The tree mirrors declared structure, so a diamond dependency appears once
//! per referencing branch. [`projection::SkillGraph`] collapses those
//! duplicates into a petgraph graph for the algorithms that need a
//! deduplicated view.

pub mod cycles;
pub mod order;
pub(crate) mod projection;
pub mod resolver;
pub mod tree;

use crate::registry::RegistryError;
use thiserror::Error;

pub use cycles::{Cycle, detect_circular};
pub use order::topological_sort;
pub use resolver::{DEFAULT_MAX_DEPTH, DependencyResolver, ResolveOptions};
pub use tree::{DependencyNode, DependencyTree};

/// Arrow used when rendering dependency paths
pub const PATH_SEPARATOR: &str = " → ";

/// Errors that can occur during resolution and ordering
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Skill not found in registry: {name}{}", required_by_suffix(.required_by))]
    NotFound {
        name: String,
        required_by: Option<String>,
    },

    #[error("Dependency depth limit of {max_depth} exceeded: {path}")]
    DepthLimitExceeded { max_depth: usize, path: String },

    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    #[error("Cycle detected while ordering install; unresolved skills: {remaining}")]
    CycleDetected { remaining: String },

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

fn required_by_suffix(required_by: &Option<String>) -> String {
    match required_by {
        Some(parent) => format!(" (required by {})", parent),
        None => String::new(),
    }
}

/// Join skill names into a displayable path
pub fn join_path<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
