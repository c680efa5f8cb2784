//! Module records and the registry that owns them.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ScanSettings;
use crate::error::{AnalysisError, FileReadWarning, Result};

/// A discovered module and what was learned about it.
///
/// Records are built in stages: [`ModuleRecord::new`] at discovery, then
/// [`with_source_files`](ModuleRecord::with_source_files) and
/// [`with_imports`](ModuleRecord::with_imports). Each stage consumes the
/// record and returns the next value; nothing mutates a record afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// Module identifier (the directory name)
    pub name: String,
    /// Directory holding the module's sources
    pub path: PathBuf,
    /// Source files found under `path`, sorted
    pub source_files: Vec<PathBuf>,
    /// Every import name found in the source files, known or not
    pub imports: BTreeSet<String>,
    /// Imports that name another known module (possibly this one)
    pub dependencies: BTreeSet<String>,
}

impl ModuleRecord {
    /// Creates a record with no files or imports.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            source_files: Vec::new(),
            imports: BTreeSet::new(),
            dependencies: BTreeSet::new(),
        }
    }

    /// Returns the record with its source file list set.
    pub fn with_source_files(mut self, mut files: Vec<PathBuf>) -> Self {
        files.sort();
        self.source_files = files;
        self
    }

    /// Returns the record with its raw imports and resolved dependencies set.
    pub fn with_imports(mut self, imports: BTreeSet<String>, dependencies: BTreeSet<String>) -> Self {
        self.imports = imports;
        self.dependencies = dependencies;
        self
    }

    /// Returns true if the module imports itself.
    pub fn is_self_dependent(&self) -> bool {
        self.dependencies.contains(&self.name)
    }
}

/// The set of modules found under a root directory, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    root: PathBuf,
    modules: IndexMap<String, ModuleRecord>,
}

impl ModuleRegistry {
    /// Creates one record per first-level subdirectory of `root`.
    ///
    /// Directories are visited in name order, so repeated scans of the same
    /// tree produce the same registry. Plain files at the first level are
    /// skipped. Every subdirectory becomes a module, including ones named in
    /// [`ScanSettings::exclude_dirs`]; that list only applies inside a module.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RootNotFound`] if `root` does not exist,
    /// [`AnalysisError::NotADirectory`] if it is not a directory, and
    /// [`AnalysisError::ReadDir`] if it cannot be listed.
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.exists() {
            return Err(AnalysisError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(AnalysisError::NotADirectory(root.to_path_buf()));
        }

        let read_dir_err = |source| AnalysisError::ReadDir {
            path: root.to_path_buf(),
            source,
        };

        let mut dirs = Vec::new();
        for entry in fs::read_dir(root).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            dirs.push((name, path));
        }
        dirs.sort();

        let registry = Self::from_records(
            root,
            dirs.into_iter()
                .map(|(name, path)| ModuleRecord::new(name, path)),
        );
        info!(root = %root.display(), modules = registry.len(), "discovered modules");
        Ok(registry)
    }

    /// Builds a registry from existing records.
    ///
    /// A later record with the same name replaces an earlier one but keeps
    /// the earlier position.
    pub fn from_records(root: impl Into<PathBuf>, records: impl IntoIterator<Item = ModuleRecord>) -> Self {
        let modules = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        Self {
            root: root.into(),
            modules,
        }
    }

    /// Fills in every module's source file list.
    ///
    /// Entries the walker cannot read are returned as warnings.
    pub fn with_source_files(self, scan: &ScanSettings) -> (Self, Vec<FileReadWarning>) {
        let mut warnings = Vec::new();
        let root = self.root;
        let modules = self
            .modules
            .into_values()
            .map(|record| {
                let (files, walk_warnings) = collect_source_files(&record.path, scan);
                debug!(module = %record.name, files = files.len(), "collected source files");
                warnings.extend(walk_warnings.into_iter().map(|w| w.in_module(&record.name)));
                record.with_source_files(files)
            })
            .collect::<Vec<_>>();

        (Self::from_records(root, modules), warnings)
    }

    /// The scanned root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Gets a module record by identifier.
    pub fn get(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.get(name)
    }

    /// Checks if a module with this identifier exists.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Module identifiers in discovery order.
    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// The set of known module identifiers.
    pub fn known_ids(&self) -> BTreeSet<&str> {
        self.module_ids().collect()
    }

    /// Iterates over records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.modules.values()
    }

    /// Consumes the registry, returning its records in discovery order.
    pub fn into_records(self) -> (PathBuf, Vec<ModuleRecord>) {
        (self.root, self.modules.into_values().collect())
    }

    /// Returns the number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Checks if no modules were found.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Total number of source files across all modules.
    pub fn total_source_files(&self) -> usize {
        self.modules.values().map(|r| r.source_files.len()).sum()
    }

    /// Module → resolved dependencies, in discovery order.
    pub fn dependency_map(&self) -> IndexMap<String, BTreeSet<String>> {
        self.modules
            .iter()
            .map(|(name, record)| (name.clone(), record.dependencies.clone()))
            .collect()
    }
}

/// Recursively lists the source files under a module directory.
///
/// Only files whose extension is in [`ScanSettings::extensions`] are kept,
/// and directories named in [`ScanSettings::exclude_dirs`] are not entered.
/// The result is sorted. Unreadable entries are skipped and reported as
/// warnings. An empty result is valid.
pub fn collect_source_files(dir: &Path, scan: &ScanSettings) -> (Vec<PathBuf>, Vec<FileReadWarning>) {
    let mut files = Vec::new();
    let mut warnings = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e, scan));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                warnings.push(FileReadWarning::new(path, e.to_string()));
                continue;
            }
        };

        if entry.file_type().is_file() && scan.is_source_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    (files, warnings)
}

fn is_excluded_dir(entry: &walkdir::DirEntry, scan: &ScanSettings) -> bool {
    entry.file_type().is_dir() && scan.is_excluded_dir(&entry.file_name().to_string_lossy())
}
