//! Export functionality for dependency analysis results.
//!
//! This module provides exporters for outputting analysis results as a
//! Graphviz DOT graph, a JSON data file, or a plain-text report.

pub mod dot;
pub mod json;
pub mod report;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::category::{Category, CategoryRules};
use crate::error::FileReadWarning;
use crate::graph::{BuildOrder, Cycle, DegreeStatistics, DependencyMap};
use crate::pipeline::Analysis;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT - clustered graph for visualization
    Dot,
    /// JSON format - machine-readable, full data
    Json,
    /// Plain text - the console report
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: dot, json, text",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Dot => write!(f, "dot"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

/// Per-module data carried into the exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    pub name: String,
    pub source_files_count: usize,
    /// All raw imports, sorted
    pub imports: Vec<String>,
    /// Resolved dependencies, sorted
    pub dependencies: Vec<String>,
}

/// Data container for export operations.
///
/// Holds all the analysis results that can be exported.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Scanned root directory
    pub root: PathBuf,
    /// Modules in discovery order
    pub modules: Vec<ModuleSummary>,
    pub dependency_graph: DependencyMap,
    pub reverse_dependencies: DependencyMap,
    pub cycles: Vec<Cycle>,
    pub build_order: BuildOrder,
    pub statistics: DegreeStatistics,
    pub categories: BTreeMap<Category, Vec<String>>,
    pub category_rules: CategoryRules,
    pub warnings: Vec<FileReadWarning>,
}

impl ExportData {
    /// Create export data from analysis results.
    pub fn new(analysis: &Analysis) -> Self {
        let modules = analysis
            .registry
            .iter()
            .map(|record| ModuleSummary {
                name: record.name.clone(),
                source_files_count: record.source_files.len(),
                imports: record.imports.iter().cloned().collect(),
                dependencies: record.dependencies.iter().cloned().collect(),
            })
            .collect();

        Self {
            root: analysis.registry.root().to_path_buf(),
            modules,
            dependency_graph: analysis.graph.forward().clone(),
            reverse_dependencies: analysis.graph.reverse().clone(),
            cycles: analysis.cycles.clone(),
            build_order: analysis.build_order.clone(),
            statistics: analysis.statistics.clone(),
            categories: analysis.categories.clone(),
            category_rules: analysis.category_rules.clone(),
            warnings: analysis.warnings.clone(),
        }
    }

    /// Number of modules depending on `module`.
    pub fn dependents_count(&self, module: &str) -> usize {
        self.reverse_dependencies.get(module).map_or(0, |d| d.len())
    }

    /// Number of dependencies of `module`.
    pub fn dependencies_count(&self, module: &str) -> usize {
        self.dependency_graph.get(module).map_or(0, |d| d.len())
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(format: ExportFormat, data: &ExportData, writer: &mut W) -> io::Result<()> {
    match format {
        ExportFormat::Dot => dot::DotExporter.export(data, writer),
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Text => report::TextReporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Export data to a file, replacing any existing content.
pub fn export_to_file(format: ExportFormat, data: &ExportData, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    export(format, data, &mut writer)?;
    writer.flush()
}
