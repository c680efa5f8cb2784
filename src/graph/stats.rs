//! Degree statistics.

use serde::Serialize;

use super::DependencyGraph;

/// How many modules appear in the "most dependent" and "most depended-on" lists.
pub const TOP_MODULES: usize = 5;

/// A module paired with one of its degree counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDegree {
    pub module: String,
    pub count: usize,
}

impl ModuleDegree {
    pub fn new(module: impl Into<String>, count: usize) -> Self {
        Self {
            module: module.into(),
            count,
        }
    }
}

/// Summary counts over the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeStatistics {
    pub total_modules: usize,
    /// Number of edges
    pub total_dependencies: usize,
    pub modules_with_dependencies: usize,
    pub modules_without_dependencies: usize,
    /// Highest out-degree first
    pub most_dependent_modules: Vec<ModuleDegree>,
    /// Highest in-degree first
    pub most_depended_on_modules: Vec<ModuleDegree>,
}

impl DependencyGraph {
    /// Computes degree statistics.
    ///
    /// The two top lists hold at most [`TOP_MODULES`] entries each, sorted by
    /// count descending with ties kept in module order. Modules with a count
    /// of zero are included when there are not enough others; readers that
    /// only care about real dependencies should skip them.
    pub fn degree_statistics(&self) -> DegreeStatistics {
        let with_deps = self
            .modules()
            .filter(|module| self.out_degree(module) > 0)
            .count();

        DegreeStatistics {
            total_modules: self.module_count(),
            total_dependencies: self.edge_count(),
            modules_with_dependencies: with_deps,
            modules_without_dependencies: self.module_count() - with_deps,
            most_dependent_modules: self.top_by(|module| self.out_degree(module)),
            most_depended_on_modules: self.top_by(|module| self.in_degree(module)),
        }
    }

    fn top_by(&self, degree: impl Fn(&str) -> usize) -> Vec<ModuleDegree> {
        let mut degrees: Vec<ModuleDegree> = self
            .modules()
            .map(|module| ModuleDegree::new(module, degree(module)))
            .collect();

        // Stable sort keeps module order among equal counts.
        degrees.sort_by(|a, b| b.count.cmp(&a.count));
        degrees.truncate(TOP_MODULES);
        degrees
    }
}
