//! Depth-first dependency resolution against a skill registry
//!
//! Expands a root skill into a [`DependencyTree`] by looking up each declared
//! dependency in a [`SkillRegistry`]. The walk is strictly sequential so
//! that the fetch cache is written once per name and the visiting order is
//! deterministic.

use super::tree::{DependencyNode, DependencyTree};
use super::{GraphError, join_path};
use crate::registry::{SkillRecord, SkillRegistry};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, trace};

/// Default maximum resolution depth
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Options for a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Deepest allowed node depth (root = 0)
    pub max_depth: usize,
    /// Flag skills already recorded at the same version and stop expanding them
    pub skip_already_installed: bool,
    /// Log every resolved node at debug level instead of trace
    pub verbose: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            skip_already_installed: false,
            verbose: false,
        }
    }
}

impl ResolveOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn skip_installed(mut self, skip: bool) -> Self {
        self.skip_already_installed = skip;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Per-call resolution state
#[derive(Default)]
struct ResolveState {
    /// Records fetched during this call, keyed by name
    cache: HashMap<String, SkillRecord>,
    /// (name, version) pairs on the current recursive path, root first
    path: Vec<(String, String)>,
    services: Vec<String>,
    seen_services: HashSet<String>,
}

impl ResolveState {
    fn note_service(&mut self, reference: &str) {
        if self.seen_services.insert(reference.to_string()) {
            self.services.push(reference.to_string());
        }
    }

    fn path_names(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(|(name, _)| name.as_str())
    }
}

type ExpandFuture<'a> = Pin<Box<dyn Future<Output = Result<DependencyNode, GraphError>> + Send + 'a>>;

/// Registry-backed dependency resolver
///
/// # Examples
///
/// ```no_run
/// use skillpack_lib::graph::{DependencyResolver, ResolveOptions};
/// use skillpack_lib::registry::{InMemoryRegistry, SkillRecord};
/// use std::sync::Arc;
///
/// # let runtime = tokio::runtime::Runtime::new().unwrap();
/// # runtime.block_on(async {
/// let registry = InMemoryRegistry::new()
///     .with_skill(SkillRecord::new("a", "1.0.0", "ref-a").with_dependencies(["b"]))
///     .with_skill(SkillRecord::new("b", "1.0.0", "ref-b"));
///
/// let resolver = DependencyResolver::new(Arc::new(registry));
/// let tree = resolver.resolve("a", &ResolveOptions::default()).await.unwrap();
/// assert_eq!(tree.total_count, 2);
/// # });
/// ```
pub struct DependencyResolver<R>
where
    R: SkillRegistry,
{
    registry: Arc<R>,
    installed: HashSet<(String, String)>,
}

impl<R> DependencyResolver<R>
where
    R: SkillRegistry,
{
    /// Create a resolver over a registry
    pub fn new(registry: Arc<R>) -> Self {
        Self {
            registry,
            installed: HashSet::new(),
        }
    }

    /// Provide the (name, version) pairs already installed
    pub fn with_installed<I>(mut self, installed: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.installed.extend(installed);
        self
    }

    /// Resolve `root` and its transitive dependencies
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotFound`] when any skill is absent from the registry
    /// - [`GraphError::DepthLimitExceeded`] when a node would sit deeper than `max_depth`
    /// - [`GraphError::CircularDependency`] when a name/version recurs on its own path
    /// - [`GraphError::Registry`] for any other registry failure
    pub async fn resolve(
        &self,
        root: &str,
        options: &ResolveOptions,
    ) -> Result<DependencyTree, GraphError> {
        debug!(
            "Resolving dependencies for '{}' (max depth {})",
            root, options.max_depth
        );

        let mut state = ResolveState::default();
        let root_node = self.expand(&mut state, options, root, 0, None).await?;
        let tree = DependencyTree::new(root_node, state.services);

        debug!(
            "Resolved '{}': {} nodes, {} unique skills fetched, max depth {}",
            root,
            tree.total_count,
            state.cache.len(),
            tree.max_depth
        );

        Ok(tree)
    }

    fn expand<'a>(
        &'a self,
        state: &'a mut ResolveState,
        options: &'a ResolveOptions,
        name: &'a str,
        depth: usize,
        required_by: Option<&'a str>,
    ) -> ExpandFuture<'a> {
        Box::pin(async move {
            if depth > options.max_depth {
                let path = join_path(state.path_names().chain(std::iter::once(name)));
                return Err(GraphError::DepthLimitExceeded {
                    max_depth: options.max_depth,
                    path,
                });
            }

            let record = self.fetch_cached(state, name, required_by).await?;

            if let Some(pos) = state
                .path
                .iter()
                .position(|(n, v)| n == &record.name && v == &record.version)
            {
                let cycle = join_path(
                    state.path[pos..]
                        .iter()
                        .map(|(n, _)| n.as_str())
                        .chain(std::iter::once(record.name.as_str())),
                );
                return Err(GraphError::CircularDependency { cycle });
            }

            let mut node =
                DependencyNode::new(&record.name, &record.version, &record.storage_ref, depth);

            if options.skip_already_installed
                && self
                    .installed
                    .contains(&(record.name.clone(), record.version.clone()))
            {
                if options.verbose {
                    debug!("{}{}@{} already installed", indent(depth), record.name, record.version);
                } else {
                    trace!("{}@{} already installed", record.name, record.version);
                }
                return Ok(node.mark_installed());
            }

            if options.verbose {
                debug!("{}{}@{}", indent(depth), record.name, record.version);
            } else {
                trace!("Resolved {}@{} at depth {}", record.name, record.version, depth);
            }

            state
                .path
                .push((record.name.clone(), record.version.clone()));

            for service in record.external_services() {
                trace!("{} references external service {}", record.name, service);
                state.note_service(service);
            }

            for dependency in record.skill_dependencies() {
                let child = self
                    .expand(state, options, dependency, depth + 1, Some(record.name.as_str()))
                    .await;
                match child {
                    Ok(child) => node.children.push(child),
                    Err(e) => {
                        state.path.pop();
                        return Err(e);
                    }
                }
            }

            state.path.pop();
            Ok(node)
        })
    }

    /// Look up `name`, hitting the registry at most once per call
    async fn fetch_cached(
        &self,
        state: &mut ResolveState,
        name: &str,
        required_by: Option<&str>,
    ) -> Result<SkillRecord, GraphError> {
        if let Some(record) = state.cache.get(name) {
            trace!("Cache hit for {}", name);
            return Ok(record.clone());
        }

        let record = self
            .registry
            .fetch(name)
            .await?
            .ok_or_else(|| GraphError::NotFound {
                name: name.to_string(),
                required_by: required_by.map(str::to_string),
            })?;

        state.cache.insert(name.to_string(), record.clone());
        Ok(record)
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    include!("resolver.test.rs");
}
