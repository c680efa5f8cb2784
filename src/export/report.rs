//! Plain-text analysis report.
//!
//! This is what the CLI prints to stdout.

use std::io::{self, Write};

use super::{ExportData, Exporter};
use crate::graph::BuildOrder;

/// Text report exporter.
pub struct TextReporter;

const RULE_WIDTH: usize = 60;

impl Exporter for TextReporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(writer, "{}", rule)?;
        writeln!(writer, "DEPENDENCY GRAPH ANALYSIS REPORT")?;
        writeln!(writer, "{}", rule)?;

        let stats = &data.statistics;
        writeln!(writer)?;
        writeln!(writer, "STATISTICS:")?;
        writeln!(writer, "  Total modules: {}", stats.total_modules)?;
        writeln!(writer, "  Total dependencies: {}", stats.total_dependencies)?;
        writeln!(writer, "  Modules with dependencies: {}", stats.modules_with_dependencies)?;
        writeln!(
            writer,
            "  Modules without dependencies: {}",
            stats.modules_without_dependencies
        )?;

        writeln!(writer)?;
        writeln!(writer, "MOST DEPENDENT MODULES (depend on many others):")?;
        for entry in stats.most_dependent_modules.iter().filter(|e| e.count > 0) {
            writeln!(writer, "  {}: {} dependencies", entry.module, entry.count)?;
        }

        writeln!(writer)?;
        writeln!(writer, "MOST DEPENDED-ON MODULES (many others depend on them):")?;
        for entry in stats.most_depended_on_modules.iter().filter(|e| e.count > 0) {
            writeln!(writer, "  {}: {} dependents", entry.module, entry.count)?;
        }

        writeln!(writer)?;
        if data.cycles.is_empty() {
            writeln!(writer, "No circular dependencies detected! ✅")?;
        } else {
            writeln!(writer, "CIRCULAR DEPENDENCIES DETECTED:")?;
            for (i, cycle) in data.cycles.iter().enumerate() {
                writeln!(writer, "  Cycle {}: {}", i + 1, cycle.cycle_path())?;
            }
        }

        writeln!(writer)?;
        match &data.build_order {
            BuildOrder::Complete(order) => {
                writeln!(writer, "SUGGESTED BUILD ORDER:")?;
                for (i, module) in order.iter().enumerate() {
                    writeln!(writer, "  {:2}. {}", i + 1, module)?;
                }
            }
            BuildOrder::Blocked { unresolved, .. } => {
                writeln!(
                    writer,
                    "Cannot determine build order due to circular dependencies."
                )?;
                writeln!(writer, "  Blocked modules: {}", unresolved.join(", "))?;
            }
        }

        writeln!(writer)?;
        writeln!(writer, "MODULE CATEGORIES:")?;
        for (category, members) in data.categories.iter().filter(|(_, m)| !m.is_empty()) {
            writeln!(writer, "  {}:", category.label())?;
            for module in members {
                writeln!(
                    writer,
                    "    • {} ({} deps, {} dependents)",
                    module,
                    data.dependencies_count(module),
                    data.dependents_count(module)
                )?;
            }
        }

        writeln!(writer)?;
        writeln!(writer, "DETAILED DEPENDENCIES:")?;
        let mut modules: Vec<&str> = data.dependency_graph.keys().map(String::as_str).collect();
        modules.sort_unstable();
        for module in modules {
            let deps = &data.dependency_graph[module];
            if deps.is_empty() {
                writeln!(writer, "  {}: (no dependencies)", module)?;
            } else {
                writeln!(writer, "  {}:", module)?;
                for dep in deps {
                    writeln!(writer, "    -> {}", dep)?;
                }
            }
        }

        if !data.warnings.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "WARNINGS ({} files could not be read):", data.warnings.len())?;
            for warning in &data.warnings {
                writeln!(writer, "  {}", warning)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileReadWarning;
    use crate::export::test_support::analysis;
    use crate::export::{export_to_string, ExportFormat};

    fn render(data: &ExportData) -> String {
        export_to_string(ExportFormat::Text, data).unwrap()
    }

    #[test]
    fn test_acyclic_report() {
        let data = ExportData::new(&analysis(&[
            ("A", &["B"]),
            ("B", &["C"]),
            ("C", &[]),
        ]));
        let report = render(&data);

        assert!(report.contains("  Total modules: 3\n"));
        assert!(report.contains("  Total dependencies: 2\n"));
        assert!(report.contains("  Modules without dependencies: 1\n"));
        assert!(report.contains("No circular dependencies detected!"));
        assert!(report.contains("SUGGESTED BUILD ORDER:\n   1. C\n   2. B\n   3. A\n"));
        assert!(report.contains("  C: (no dependencies)\n"));
        assert!(report.contains("  A:\n    -> B\n"));
        assert!(report.contains("  Infrastructure:\n    • A (1 deps, 0 dependents)\n"));
        assert!(!report.contains("WARNINGS"));
    }

    #[test]
    fn test_cyclic_report() {
        let data = ExportData::new(&analysis(&[("A", &["B"]), ("B", &["A"]), ("X", &["X"])]));
        let report = render(&data);

        assert!(report.contains("CIRCULAR DEPENDENCIES DETECTED:\n"));
        assert!(report.contains("  Cycle 1: A -> B -> A\n"));
        assert!(report.contains("  Cycle 2: X -> X\n"));
        assert!(report.contains("Cannot determine build order due to circular dependencies.\n"));
        assert!(report.contains("  Blocked modules: A, B, X\n"));
        assert!(!report.contains("SUGGESTED BUILD ORDER"));
    }

    #[test]
    fn test_zero_counts_hidden() {
        let data = ExportData::new(&analysis(&[("Solo", &[])]));
        let report = render(&data);

        assert!(!report.contains("Solo: 0 dependencies"));
        assert!(!report.contains("Solo: 0 dependents"));
    }

    #[test]
    fn test_warnings_listed() {
        let mut data = ExportData::new(&analysis(&[("Z", &[])]));
        data.warnings.push(FileReadWarning::new("/SubModules/Z/Bad.swift", "invalid UTF-8"));

        let report = render(&data);
        assert!(report.contains("WARNINGS (1 files could not be read):\n"));
        assert!(report.contains("  could not read /SubModules/Z/Bad.swift: invalid UTF-8\n"));
    }
}
