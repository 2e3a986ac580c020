//! Cycle detection over a resolved dependency tree
//!
//! Nodes are identified by (name, version). A skill depending on a
//! different version of itself is not a cycle.

use super::projection::SkillGraph;
use super::tree::{DependencyNode, DependencyTree};
use super::join_path;
use std::collections::HashMap;
use tracing::{debug, trace};

/// A circular dependency path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Names from the first revisited skill back to itself, inclusive
    pub path: Vec<String>,
    /// Arrow-joined rendering of `path`
    pub description: String,
}

impl Cycle {
    fn new(path: Vec<String>) -> Self {
        let description = join_path(&path);
        Self { path, description }
    }

    /// A skill that lists itself as a dependency
    pub fn is_self_cycle(&self) -> bool {
        self.path.len() == 2
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited
    White,
    /// On the current root-to-node path
    Gray,
    /// An identical subtree under this key is fully explored
    Black,
}

type Key<'a> = (&'a str, &'a str);

/// DFS state over the raw tree, keyed by (name, version)
#[derive(Default)]
struct Walk<'a> {
    path: Vec<Key<'a>>,
    finished: HashMap<Key<'a>, &'a DependencyNode>,
    cycles: Vec<Cycle>,
}

impl<'a> Walk<'a> {
    fn color(&self, node: &'a DependencyNode) -> Color {
        let key = node.key();
        if self.path.contains(&key) {
            Color::Gray
        } else if self.finished.get(&key).is_some_and(|done| *done == node) {
            Color::Black
        } else {
            Color::White
        }
    }

    fn visit(&mut self, node: &'a DependencyNode) {
        self.path.push(node.key());

        for child in &node.children {
            match self.color(child) {
                Color::White => self.visit(child),
                Color::Gray => self.record(child),
                Color::Black => {}
            }
        }

        self.path.pop();
        self.finished.insert(node.key(), node);
    }

    fn record(&mut self, child: &'a DependencyNode) {
        let key = child.key();
        let Some(start) = self.path.iter().position(|k| *k == key) else {
            return;
        };
        let cycle = Cycle::new(
            self.path[start..]
                .iter()
                .map(|(name, _)| name.to_string())
                .chain(std::iter::once(child.name.clone()))
                .collect(),
        );
        // Duplicated subtrees repeat the same cycle
        if !self.cycles.contains(&cycle) {
            self.cycles.push(cycle);
        }
    }
}

/// Find every circular dependency in `tree`
///
/// Runs a white/gray/black depth-first search over the tree's parent →
/// child edges. A child whose (name, version) is already on the current
/// root-to-node path closes a [`Cycle`], so independent cycles in separate
/// branches are all reported. Skills that merely meet from different
/// branches (diamonds, or `x → y` in one branch and `y → x` in another) are
/// not cycles. An empty result means the tree is acyclic.
pub fn detect_circular(tree: &DependencyTree) -> Vec<Cycle> {
    // Every path cycle is also a cycle of the merged graph
    let graph = SkillGraph::from_tree(tree, |node| (node.name.clone(), node.version.clone()));
    if !graph.has_cycles() {
        trace!("No cycles in tree rooted at {}", tree.root.name);
        return Vec::new();
    }

    let mut walk = Walk::default();
    walk.visit(&tree.root);

    debug!(
        "Detected {} cycle(s) in tree rooted at {}",
        walk.cycles.len(),
        tree.root.name
    );
    walk.cycles
}

#[cfg(test)]
mod tests {
    include!("cycles.test.rs");
}
