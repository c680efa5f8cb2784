//! Dependency graph construction.
//!
//! The forward map is the only input; the reverse map is always derived from
//! it and never edited on its own. petgraph is used for the structural checks
//! (cyclicity, strongly connected components).

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::registry::ModuleRegistry;

/// Module → set of modules, in module insertion order.
pub type DependencyMap = IndexMap<String, BTreeSet<String>>;

/// Derives the reverse map from a forward map.
///
/// Every module in `forward` gets an entry, possibly empty, and for every
/// `d ∈ forward[m]`, `m ∈ reverse[d]`. Targets missing from `forward` get an
/// entry too, after the known modules.
///
/// # Example
///
/// ```rust
/// use modscope::graph::{compute_reverse, DependencyMap};
///
/// let mut forward = DependencyMap::new();
/// forward.insert("App".into(), ["Core".to_string()].into());
/// forward.insert("Core".into(), Default::default());
///
/// let reverse = compute_reverse(&forward);
/// assert!(reverse["Core"].contains("App"));
/// assert!(reverse["App"].is_empty());
/// ```
pub fn compute_reverse(forward: &DependencyMap) -> DependencyMap {
    let mut reverse: DependencyMap = forward
        .keys()
        .map(|module| (module.clone(), BTreeSet::new()))
        .collect();

    for (module, deps) in forward {
        for dep in deps {
            reverse
                .entry(dep.clone())
                .or_default()
                .insert(module.clone());
        }
    }

    reverse
}

/// A directed graph of module dependencies.
///
/// Edges point from the dependent module to its dependency. Every edge
/// endpoint is a known module: edges naming unknown modules are dropped on
/// construction. Self-loops are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    forward: DependencyMap,
    reverse: DependencyMap,
}

impl DependencyGraph {
    /// Builds a graph from (module, dependencies) pairs.
    ///
    /// Module order is the order of first appearance. Repeated modules have
    /// their dependencies merged. Dependencies that are not themselves listed
    /// as modules are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modscope::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::new([
    ///     ("UIHome", vec!["WalletCore", "UIKit"]),
    ///     ("WalletCore", vec![]),
    /// ]);
    ///
    /// assert_eq!(graph.module_count(), 2);
    /// assert_eq!(graph.edge_count(), 1); // UIKit is not a module
    /// ```
    pub fn new<I, M, D, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = (M, D)>,
        M: Into<String>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut raw = DependencyMap::new();
        for (module, deps) in modules {
            raw.entry(module.into())
                .or_default()
                .extend(deps.into_iter().map(Into::into));
        }

        let known: BTreeSet<String> = raw.keys().cloned().collect();
        let forward: DependencyMap = raw
            .into_iter()
            .map(|(module, deps)| {
                let (kept, dropped): (BTreeSet<String>, BTreeSet<String>) =
                    deps.into_iter().partition(|d| known.contains(d));
                if !dropped.is_empty() {
                    debug!(module = %module, dropped = dropped.len(), "dropping edges to unknown modules");
                }
                (module, kept)
            })
            .collect();

        let reverse = compute_reverse(&forward);
        Self { forward, reverse }
    }

    /// Builds a graph from the resolved dependencies of a registry.
    pub fn from_registry(registry: &ModuleRegistry) -> Self {
        Self::new(registry.dependency_map())
    }

    /// The forward map: module → its dependencies.
    pub fn forward(&self) -> &DependencyMap {
        &self.forward
    }

    /// The reverse map: module → modules that depend on it.
    pub fn reverse(&self) -> &DependencyMap {
        &self.reverse
    }

    /// Module identifiers in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    /// Dependencies of a module, sorted. Empty for unknown modules.
    pub fn dependencies(&self, module: &str) -> impl Iterator<Item = &str> {
        self.forward
            .get(module)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Modules that depend on `module`, sorted. Empty for unknown modules.
    pub fn dependents(&self, module: &str) -> impl Iterator<Item = &str> {
        self.reverse
            .get(module)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Number of dependencies of a module.
    pub fn out_degree(&self, module: &str) -> usize {
        self.forward.get(module).map_or(0, BTreeSet::len)
    }

    /// Number of modules depending on a module.
    pub fn in_degree(&self, module: &str) -> usize {
        self.reverse.get(module).map_or(0, BTreeSet::len)
    }

    /// Checks if a module exists in the graph.
    pub fn contains(&self, module: &str) -> bool {
        self.forward.contains_key(module)
    }

    /// Checks if there is an edge `from → to`.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.forward.get(from).is_some_and(|deps| deps.contains(to))
    }

    /// Returns the number of modules.
    pub fn module_count(&self) -> usize {
        self.forward.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }

    /// Checks if the graph has no modules.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Checks if the graph contains any cycle, self-loops included.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.to_digraph())
    }

    /// Strongly connected components that contain a cycle.
    ///
    /// This is the component-level view of circular dependencies: each
    /// component lists every module that is mutually reachable, instead of
    /// individual cycle paths. A single module is included only when it
    /// imports itself. Members are sorted, and so is the list.
    pub fn cyclic_components(&self) -> Vec<Vec<String>> {
        let graph = self.to_digraph();

        let mut components: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut names: Vec<String> = scc.iter().map(|&idx| graph[idx].to_string()).collect();
                names.sort();
                names
            })
            .collect();

        components.sort();
        components
    }

    /// Modules that belong to at least one cyclic component.
    pub fn modules_in_cycles(&self) -> BTreeSet<String> {
        self.cyclic_components().into_iter().flatten().collect()
    }

    fn to_digraph(&self) -> DiGraph<&str, ()> {
        let mut graph = DiGraph::with_capacity(self.module_count(), self.edge_count());
        let indices: HashMap<&str, NodeIndex> = self
            .modules()
            .map(|module| (module, graph.add_node(module)))
            .collect();

        for (module, deps) in &self.forward {
            for dep in deps {
                graph.add_edge(indices[module.as_str()], indices[dep.as_str()], ());
            }
        }

        graph
    }
}
