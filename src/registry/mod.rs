//! Module discovery.
//!
//! A module is a first-level subdirectory of the scanned root. This module
//! finds them, collects their source files, and holds the resulting
//! [`ModuleRecord`]s in a [`ModuleRegistry`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use modscope::registry::ModuleRegistry;
//!
//! let registry = ModuleRegistry::discover(Path::new("SubModules"))?;
//! for record in registry.iter() {
//!     println!("{}: {} files", record.name, record.source_files.len());
//! }
//! ```

mod module_registry;

pub use module_registry::{collect_source_files, ModuleRecord, ModuleRegistry};
