//! Install ordering via Kahn's algorithm

use super::GraphError;
use super::projection::SkillGraph;
use super::tree::DependencyTree;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Compute an install order for `tree`, dependencies first
///
/// Skills are deduplicated by bare name, so a shared dependency appears
/// exactly once, ahead of every skill that needs it. Ties between mutually
/// independent skills are broken by first appearance in the tree.
///
/// # Errors
///
/// [`GraphError::CycleDetected`] when some skills can never reach zero
/// in-degree. This guards the ordering even if cycle detection was skipped.
pub fn topological_sort(tree: &DependencyTree) -> Result<Vec<String>, GraphError> {
    let graph = SkillGraph::from_tree(tree, |node| node.name.clone());

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.dependency_count(idx))
        .collect();

    let mut queue: VecDeque<_> = graph
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(idx) = queue.pop_front() {
        let name = graph.key(idx);
        trace!("Install position {}: {}", order.len(), name);
        order.push(name.clone());

        for dependent in graph.dependents_of(idx) {
            let degree = &mut in_degree[dependent.index()];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() < graph.node_count() {
        let remaining: Vec<&str> = graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] > 0)
            .map(|idx| graph.key(idx).as_str())
            .collect();
        return Err(GraphError::CycleDetected {
            remaining: remaining.join(", "),
        });
    }

    debug!("Install order for {}: {}", tree.root.name, order.join(", "));
    Ok(order)
}

#[cfg(test)]
mod tests {
    include!("order.test.rs");
}
