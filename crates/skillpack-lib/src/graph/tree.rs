//! Resolved dependency tree
//!
//! Nodes own their children by value. A skill reached through two branches
//! is two distinct nodes; deduplication happens only inside the algorithms
//! that need it.

use serde::Serialize;

/// A skill in the resolved tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub name: String,
    pub version: String,
    /// Opaque content-address of the skill archive
    pub storage_ref: String,
    /// Dependencies in declared order
    pub children: Vec<DependencyNode>,
    /// Edges from the root (root = 0)
    pub depth: usize,
    /// Already present in the lock file with the same version
    pub installed: bool,
}

impl DependencyNode {
    /// Create a leaf node
    pub fn new(name: &str, version: &str, storage_ref: &str, depth: usize) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            storage_ref: storage_ref.to_string(),
            children: Vec::new(),
            depth,
            installed: false,
        }
    }

    /// Append a child
    pub fn with_child(mut self, child: DependencyNode) -> Self {
        self.children.push(child);
        self
    }

    /// Mark the node as already installed
    pub fn mark_installed(mut self) -> Self {
        self.installed = true;
        self
    }

    /// Identity used for cycle detection
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.version)
    }

    /// Pre-order walk over this node and all descendants
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree, duplicates included
pub struct PreOrder<'a> {
    stack: Vec<&'a DependencyNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a DependencyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A resolved dependency tree with summary statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyTree {
    pub root: DependencyNode,
    /// Deepest node depth
    pub max_depth: usize,
    /// Node count including duplicates
    pub total_count: usize,
    /// Nodes flagged as already installed
    pub installed_count: usize,
    /// External-service references seen during resolution, first-seen order
    pub external_services: Vec<String>,
}

impl DependencyTree {
    /// Build a tree from its root, computing statistics
    pub fn new(root: DependencyNode, external_services: Vec<String>) -> Self {
        let mut max_depth = 0;
        let mut total_count = 0;
        let mut installed_count = 0;

        for node in root.iter() {
            max_depth = max_depth.max(node.depth);
            total_count += 1;
            if node.installed {
                installed_count += 1;
            }
        }

        Self {
            root,
            max_depth,
            total_count,
            installed_count,
            external_services,
        }
    }

    /// Tree without external-service notices
    pub fn from_root(root: DependencyNode) -> Self {
        Self::new(root, Vec::new())
    }

    /// Pre-order view of every node, duplicates included
    pub fn flattened(&self) -> PreOrder<'_> {
        self.root.iter()
    }

    /// First node with the given name in pre-order
    pub fn find(&self, name: &str) -> Option<&DependencyNode> {
        self.flattened().find(|node| node.name == name)
    }
}

#[cfg(test)]
mod tests {
    include!("tree.test.rs");
}
