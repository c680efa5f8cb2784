//! ModScope - module dependency graph analyzer
//!
//! Scans a directory whose immediate subdirectories are modules, extracts
//! `import` statements from their source files, and builds the dependency
//! graph between them. From the graph it reports circular dependencies, a
//! dependency-first build order, degree statistics and module categories,
//! and exports everything as Graphviz DOT, JSON, or a text report.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use modscope::{Analyzer, Config, ExportData, ExportFormat};
//!
//! let analysis = Analyzer::new(Config::default()).run(Path::new("../SubModules"))?;
//! let data = ExportData::new(&analysis);
//! print!("{}", modscope::export::export_to_string(ExportFormat::Text, &data)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod category;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod logger;
pub mod pipeline;
pub mod registry;
pub mod resolver;

pub use category::{Category, CategoryRules};
pub use config::{Config, ConfigError, ScanSettings};
pub use error::{AnalysisError, FileReadWarning, Result};
pub use export::{ExportData, ExportFormat};
pub use graph::{BuildOrder, Cycle, DegreeStatistics, DependencyGraph};
pub use pipeline::{Analysis, Analyzer};
pub use registry::{ModuleRecord, ModuleRegistry};
