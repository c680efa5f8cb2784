//! JSON export implementation.
//!
//! Exports dependency analysis results in JSON format for machine-readable output.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use indexmap::IndexMap;
use serde::Serialize;

use super::{ExportData, Exporter};
use crate::category::Category;
use crate::graph::DegreeStatistics;

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable module entry for JSON output.
#[derive(Serialize)]
struct JsonModule<'a> {
    source_files_count: usize,
    all_imports: &'a [String],
    module_dependencies: &'a [String],
}

/// Serializable file warning for JSON output.
#[derive(Serialize)]
struct JsonWarning<'a> {
    path: String,
    module: Option<&'a str>,
    message: &'a str,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    root: String,
    modules: IndexMap<&'a str, JsonModule<'a>>,
    dependency_graph: &'a IndexMap<String, BTreeSet<String>>,
    reverse_dependencies: &'a IndexMap<String, BTreeSet<String>>,
    module_categories: &'a BTreeMap<Category, Vec<String>>,
    statistics: &'a DegreeStatistics,
    cycles: Vec<&'a [String]>,
    /// `null` when cycles prevent a total order
    build_order: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<JsonWarning<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let modules = data
            .modules
            .iter()
            .map(|m| {
                (
                    m.name.as_str(),
                    JsonModule {
                        source_files_count: m.source_files_count,
                        all_imports: &m.imports,
                        module_dependencies: &m.dependencies,
                    },
                )
            })
            .collect();

        let warnings = data
            .warnings
            .iter()
            .map(|w| JsonWarning {
                path: w.path.display().to_string(),
                module: w.module.as_deref(),
                message: &w.message,
            })
            .collect();

        let export = JsonExport {
            root: data.root.display().to_string(),
            modules,
            dependency_graph: &data.dependency_graph,
            reverse_dependencies: &data.reverse_dependencies,
            module_categories: &data.categories,
            statistics: &data.statistics,
            cycles: data.cycles.iter().map(|c| c.nodes.as_slice()).collect(),
            build_order: data.build_order.order(),
            warnings,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::analysis;
    use crate::export::{export_to_string, ExportFormat};
    use serde_json::{json, Value};

    fn render(modules: &[(&str, &[&str])]) -> Value {
        let data = ExportData::new(&analysis(modules));
        let text = export_to_string(ExportFormat::Json, &data).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_json_structure() {
        let value = render(&[
            ("UIHome", &["UIKit", "WalletCore", "UISwap"]),
            ("UISwap", &["WalletCore"]),
            ("WalletCore", &["Foundation"]),
        ]);

        assert_eq!(
            value["modules"]["UIHome"],
            json!({
                "source_files_count": 1,
                "all_imports": ["UIKit", "UISwap", "WalletCore"],
                "module_dependencies": ["UISwap", "WalletCore"],
            })
        );
        assert_eq!(value["dependency_graph"]["UISwap"], json!(["WalletCore"]));
        assert_eq!(value["reverse_dependencies"]["WalletCore"], json!(["UIHome", "UISwap"]));
        assert_eq!(value["reverse_dependencies"]["UIHome"], json!([]));
        assert_eq!(value["module_categories"]["main_app"], json!(["UIHome"]));
        assert_eq!(value["module_categories"]["core_foundation"], json!(["WalletCore"]));
        assert_eq!(value["module_categories"]["ui_features"], json!(["UISwap"]));
        assert_eq!(value["module_categories"]["infrastructure"], json!([]));
        assert_eq!(value["statistics"]["total_dependencies"], json!(3));
        assert_eq!(value["cycles"], json!([]));
        assert_eq!(value["build_order"], json!(["WalletCore", "UISwap", "UIHome"]));
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn test_json_cycles_and_blocked_order() {
        let value = render(&[("A", &["B"]), ("B", &["A"])]);

        assert_eq!(value["cycles"], json!([["A", "B", "A"]]));
        assert_eq!(value["build_order"], Value::Null);
    }

    #[test]
    fn test_json_warnings_carry_module() {
        let mut data = ExportData::new(&analysis(&[("Z", &[])]));
        data.warnings
            .push(crate::error::FileReadWarning::new("/SubModules/Z/Bad.swift", "invalid UTF-8").in_module("Z"));

        let text = export_to_string(ExportFormat::Json, &data).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value["warnings"],
            json!([{ "path": "/SubModules/Z/Bad.swift", "module": "Z", "message": "invalid UTF-8" }])
        );
    }

    #[test]
    fn test_json_is_deterministic() {
        let modules: &[(&str, &[&str])] = &[("B", &["A"]), ("A", &[]), ("C", &["A", "B"])];
        let data = ExportData::new(&analysis(modules));

        let first = export_to_string(ExportFormat::Json, &data).unwrap();
        let second = export_to_string(ExportFormat::Json, &ExportData::new(&analysis(modules))).unwrap();
        assert_eq!(first, second);
    }
}
