//! Lexical import extraction.
//!
//! Imports are found by pattern matching on raw text, not by parsing. A line
//! counts as an import when it starts (after optional whitespace) with the
//! `import` keyword followed by an identifier. Attributed imports such as
//! `@testable import Foo` and kind-qualified imports such as
//! `import struct Foo.Bar` are not understood; that imprecision is accepted.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::FileReadWarning;
use crate::registry::ModuleRegistry;

/// `import` at the start of a line, then an identifier.
static IMPORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// Strategy for pulling raw import names out of source text.
///
/// Implementations must be stateless with respect to the text they are given;
/// the same extractor is shared across threads.
pub trait ImportExtractor: Send + Sync {
    /// Returns every import name referenced by `source`.
    fn extract(&self, source: &str) -> BTreeSet<String>;
}

/// Regex-based extractor for `import Name` declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalImportExtractor;

impl LexicalImportExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ImportExtractor for LexicalImportExtractor {
    fn extract(&self, source: &str) -> BTreeSet<String> {
        IMPORT_PATTERN
            .captures_iter(source)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Reads one file and extracts its imports.
///
/// # Errors
///
/// Returns a [`FileReadWarning`] if the file cannot be read or is not valid
/// UTF-8. Callers treat this as non-fatal.
pub fn extract_imports(path: &Path, extractor: &dyn ImportExtractor) -> Result<BTreeSet<String>, FileReadWarning> {
    let content = fs::read_to_string(path).map_err(|e| FileReadWarning::new(path, e.to_string()))?;
    Ok(extractor.extract(&content))
}

/// Extracts and merges the imports of every file in one module.
///
/// Files are read in parallel. The merge is a set union, so the result does
/// not depend on which read finishes first. Unreadable files are logged,
/// contribute nothing, and are returned as warnings in path order.
pub fn extract_module_imports(
    files: &[PathBuf],
    extractor: &dyn ImportExtractor,
) -> (BTreeSet<String>, Vec<FileReadWarning>) {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| extract_imports(path, extractor))
        .collect();

    let mut imports = BTreeSet::new();
    let mut warnings = Vec::new();
    for result in results {
        match result {
            Ok(found) => imports.extend(found),
            Err(warning) => {
                warn!(path = %warning.path.display(), error = %warning.message, "could not read source file");
                warnings.push(warning);
            }
        }
    }

    (imports, warnings)
}

/// Narrows raw imports to identifiers of known modules.
///
/// External imports are dropped silently. A module importing itself keeps
/// that import, which later surfaces as a self-loop.
pub fn resolve_dependencies<I, S>(known: I, raw_imports: &BTreeSet<String>) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let known: BTreeSet<String> = known.into_iter().map(|s| s.as_ref().to_string()).collect();
    raw_imports
        .iter()
        .filter(|name| known.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Extracts imports for every module in the registry and resolves them.
///
/// Returns the updated registry together with any file warnings.
pub fn resolve_modules(
    registry: ModuleRegistry,
    extractor: &dyn ImportExtractor,
) -> (ModuleRegistry, Vec<FileReadWarning>) {
    let known: BTreeSet<String> = registry.module_ids().map(str::to_string).collect();
    let (root, records) = registry.into_records();

    let mut warnings = Vec::new();
    let records: Vec<_> = records
        .into_iter()
        .map(|record| {
            let (imports, file_warnings) = extract_module_imports(&record.source_files, extractor);
            warnings.extend(file_warnings.into_iter().map(|w| w.in_module(&record.name)));

            let dependencies = resolve_dependencies(&known, &imports);
            if !dependencies.is_empty() {
                debug!(
                    module = %record.name,
                    depends_on = %dependencies.iter().cloned().collect::<Vec<_>>().join(", "),
                    "resolved dependencies"
                );
            }
            record.with_imports(imports, dependencies)
        })
        .collect();

    (ModuleRegistry::from_records(root, records), warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanSettings;
    use tempfile::TempDir;

    fn extract(source: &str) -> Vec<String> {
        LexicalImportExtractor::new().extract(source).into_iter().collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_imports() {
        let source = "import UIKit\nimport WalletCore\n\nfinal class HomeVC {}\n";
        assert_eq!(extract(source), vec!["UIKit", "WalletCore"]);
    }

    #[test]
    fn test_indented_and_duplicate_imports() {
        let source = "  import WalletContext\n\timport WalletContext\n#if DEBUG\n    import UIComponents\n#endif\n";
        assert_eq!(extract(source), vec!["UIComponents", "WalletContext"]);
    }

    #[test]
    fn test_submodule_import_keeps_first_identifier() {
        assert_eq!(extract("import Foundation.NSString\n"), vec!["Foundation"]);
    }

    #[test]
    fn test_non_imports_ignored() {
        let source = r#"
let important = 1
// import Commented
let s = "import Quoted"
func importData() {}
@testable import WalletCore
"#;
        assert!(extract(source).is_empty());
    }

    #[test]
    fn test_kind_qualified_import_is_a_known_limitation() {
        // Lexical matching reads the kind keyword as the module name.
        assert_eq!(extract("import struct WalletCore.Account\n"), vec!["struct"]);
    }

    #[test]
    fn test_resolve_drops_external_keeps_self() {
        let raw = set(&["Foundation", "UIKit", "WalletCore", "UIHome"]);
        let deps = resolve_dependencies(["UIHome", "WalletCore", "UISwap"], &raw);
        assert_eq!(deps, set(&["UIHome", "WalletCore"]));
    }

    #[test]
    fn test_resolve_empty() {
        let deps = resolve_dependencies(Vec::<String>::new(), &set(&["UIKit"]));
        assert!(deps.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("Good.swift");
        let bad = dir.path().join("Bad.swift");
        let missing = dir.path().join("Missing.swift");
        fs::write(&good, "import WalletCore\n").unwrap();
        fs::write(&bad, [0xff, 0xfe, 0x00, 0x69]).unwrap();

        let (imports, warnings) =
            extract_module_imports(&[bad.clone(), good, missing.clone()], &LexicalImportExtractor);

        assert_eq!(imports, set(&["WalletCore"]));
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].path, bad);
        assert_eq!(warnings[1].path, missing);
    }

    #[test]
    fn test_resolve_modules_end_to_end() {
        let dir = TempDir::new().unwrap();
        let write = |rel: &str, body: &str| {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        };
        write("UIHome/Home.swift", "import UIKit\nimport WalletCore\n");
        write("UIHome/Views/Row.swift", "import UIComponents\n");
        write("UIComponents/Button.swift", "import UIKit\n");
        write("WalletCore/Core.swift", "import Foundation\nimport WalletCore\n");

        let scan = ScanSettings::default();
        let registry = ModuleRegistry::discover(dir.path()).unwrap();
        let (registry, _) = registry.with_source_files(&scan);
        let (registry, warnings) = resolve_modules(registry, &LexicalImportExtractor);

        assert!(warnings.is_empty());
        let home = registry.get("UIHome").unwrap();
        assert_eq!(home.imports, set(&["UIComponents", "UIKit", "WalletCore"]));
        assert_eq!(home.dependencies, set(&["UIComponents", "WalletCore"]));
        assert!(registry.get("UIComponents").unwrap().dependencies.is_empty());
        assert!(registry.get("WalletCore").unwrap().is_self_dependent());
    }

    struct FixedExtractor;

    impl ImportExtractor for FixedExtractor {
        fn extract(&self, _source: &str) -> BTreeSet<String> {
            ["A"].iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn test_custom_extractor_plugs_in() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("x.swift");
        fs::write(&file, "anything").unwrap();

        let imports = extract_imports(&file, &FixedExtractor).unwrap();
        assert_eq!(imports, set(&["A"]));
    }
}
