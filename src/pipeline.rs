//! End-to-end analysis: scan, extract, resolve, build the graph, analyze.
//!
//! Each stage takes the previous stage's value and returns a new one; the
//! finished [`Analysis`] is read-only.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, info_span, warn};

use crate::category::{Category, CategoryRules};
use crate::config::Config;
use crate::error::{FileReadWarning, Result};
use crate::graph::{BuildOrder, Cycle, DegreeStatistics, DependencyGraph};
use crate::registry::ModuleRegistry;
use crate::resolver::{resolve_modules, ImportExtractor, LexicalImportExtractor};

/// Everything learned from one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Modules with their files, imports and resolved dependencies
    pub registry: ModuleRegistry,
    /// Forward and reverse dependency maps
    pub graph: DependencyGraph,
    /// Circular dependency paths; empty when acyclic
    pub cycles: Vec<Cycle>,
    /// Suggested build order, or the modules blocked by cycles
    pub build_order: BuildOrder,
    pub statistics: DegreeStatistics,
    /// Category → sorted members; every category present
    pub categories: BTreeMap<Category, Vec<String>>,
    /// The rules the categories were computed with
    pub category_rules: CategoryRules,
    /// Files or directory entries that could not be read
    pub warnings: Vec<FileReadWarning>,
}

impl Analysis {
    /// Category of a module under the rules used for this run.
    pub fn category_of(&self, module: &str) -> Category {
        self.category_rules.categorize(module)
    }

    /// Returns true if any circular dependency was found.
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Runs the analysis pipeline with a given configuration.
pub struct Analyzer {
    config: Config,
    extractor: Arc<dyn ImportExtractor>,
}

impl Analyzer {
    /// Creates an analyzer using lexical import matching.
    pub fn new(config: Config) -> Self {
        Self::with_extractor(config, Arc::new(LexicalImportExtractor::new()))
    }

    /// Creates an analyzer with a custom import extraction strategy.
    pub fn with_extractor(config: Config, extractor: Arc<dyn ImportExtractor>) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes the modules under `root`.
    ///
    /// # Errors
    ///
    /// Fails only if `root` is missing, not a directory, or cannot be listed.
    /// Unreadable source files are collected in [`Analysis::warnings`].
    pub fn run(&self, root: &Path) -> Result<Analysis> {
        let _span = info_span!("analyze", root = %root.display()).entered();
        let scan = &self.config.scan;

        let registry = ModuleRegistry::discover(root)?;

        let (registry, mut warnings) = registry.with_source_files(scan);
        info!(files = registry.total_source_files(), "collected source files");

        let (registry, file_warnings) = resolve_modules(registry, self.extractor.as_ref());
        warnings.extend(file_warnings);

        let graph = DependencyGraph::from_registry(&registry);
        info!(
            modules = graph.module_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        let cycles = graph.detect_cycles();
        if !cycles.is_empty() {
            warn!(cycles = cycles.len(), "circular dependencies detected");
        }

        let build_order = graph.build_order();
        let statistics = graph.degree_statistics();
        let category_rules = self.config.categories.clone();
        let categories = category_rules.categorize_all(graph.modules());

        if !warnings.is_empty() {
            warn!(count = warnings.len(), "some files could not be read");
        }

        Ok(Analysis {
            registry,
            graph,
            cycles,
            build_order,
            statistics,
            categories,
            category_rules,
            warnings,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
