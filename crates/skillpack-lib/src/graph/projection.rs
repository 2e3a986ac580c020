//! Deduplicated graph projection of a dependency tree

use super::tree::{DependencyNode, DependencyTree};
use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::trace;

/// Skills collapsed by key, with edges from dependency to dependent
///
/// Node indices follow first-seen pre-order, so iteration over
/// [`SkillGraph::node_indices`] starts at the tree root.
pub(crate) struct SkillGraph<K> {
    graph: DiGraph<K, ()>,
    index: HashMap<K, NodeIndex>,
}

impl<K> SkillGraph<K>
where
    K: Clone + Eq + Hash,
{
    /// Project a tree, merging nodes that share a key
    pub fn from_tree<F>(tree: &DependencyTree, key: F) -> Self
    where
        F: Fn(&DependencyNode) -> K,
    {
        let mut projection = Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        };
        projection.add_subtree(&tree.root, &key);

        trace!(
            "Projected {} tree nodes onto {} graph nodes and {} edges",
            tree.total_count,
            projection.graph.node_count(),
            projection.graph.edge_count()
        );

        projection
    }

    fn add_subtree<F>(&mut self, node: &DependencyNode, key: &F) -> NodeIndex
    where
        F: Fn(&DependencyNode) -> K,
    {
        let idx = self.add_node(key(node));
        for child in &node.children {
            let child_idx = self.add_subtree(child, key);
            // update_edge keeps diamond duplicates from adding parallel edges
            self.graph.update_edge(child_idx, idx, ());
        }
        idx
    }

    fn add_node(&mut self, key: K) -> NodeIndex {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.index.insert(key, idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn key(&self, idx: NodeIndex) -> &K {
        &self.graph[idx]
    }

    /// Whether any directed cycle exists, self-loops included
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// What depends on `idx`, in first-seen order
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_insertion_order(idx, Direction::Outgoing)
    }

    /// Number of distinct dependencies of `idx`
    pub fn dependency_count(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Incoming).count()
    }

    fn neighbors_in_insertion_order(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        // petgraph yields the most recently added edge first
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        neighbors.reverse();
        neighbors
    }
}

#[cfg(test)]
mod tests {
    include!("projection.test.rs");
}
