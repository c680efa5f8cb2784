//! Graphviz DOT export.
//!
//! Modules are grouped into one cluster per non-empty category. Edges are
//! styled by what they point at: self-loops are flagged red, edges into core
//! foundation modules are muted, and edges into UI modules are highlighted.
//!
//! Render with `dot -Tsvg dependency_graph.dot -o dependency_graph.svg`.

use std::io::{self, Write};

use super::{ExportData, Exporter};
use crate::category::Category;

/// DOT exporter implementation.
pub struct DotExporter;

struct ClusterStyle {
    fill: &'static str,
    node_style: &'static str,
    border: &'static str,
}

fn cluster_style(category: Category) -> ClusterStyle {
    match category {
        Category::MainApplication => ClusterStyle {
            fill: "#ff6b6b",
            node_style: "filled,bold",
            border: "#d63031",
        },
        Category::CoreFoundation => ClusterStyle {
            fill: "#4ecdc4",
            node_style: "filled,bold",
            border: "#00b894",
        },
        Category::UIFeature => ClusterStyle {
            fill: "#ffe66d",
            node_style: "filled",
            border: "#fdcb6e",
        },
        Category::Infrastructure => ClusterStyle {
            fill: "#a8e6cf",
            node_style: "filled",
            border: "#00b894",
        },
    }
}

/// Quotes a string as a DOT identifier.
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph DependencyGraph {{")?;
        writeln!(writer, "  rankdir=TB;")?;
        writeln!(writer, "  node [shape=box, fontname=\"Helvetica\", fontsize=10];")?;
        writeln!(writer, "  edge [fontname=\"Helvetica\", fontsize=8];")?;
        writeln!(writer, "  compound=true;")?;
        writeln!(writer, "  newrank=true;")?;
        writeln!(writer, "  splines=true;")?;
        writeln!(writer, "  overlap=false;")?;
        writeln!(writer)?;

        let clusters = data.categories.iter().filter(|(_, members)| !members.is_empty());
        for (cluster_id, (category, members)) in clusters.enumerate() {
            let style = cluster_style(*category);

            writeln!(writer, "  subgraph cluster_{} {{", cluster_id)?;
            writeln!(writer, "    label=\"{}\";", category.label())?;
            writeln!(writer, "    style=\"filled,rounded\";")?;
            // Two trailing hex digits give the cluster background its transparency.
            writeln!(writer, "    fillcolor=\"{}30\";", style.border)?;
            writeln!(writer, "    color=\"{}\";", style.border)?;
            writeln!(writer, "    fontname=\"Helvetica-Bold\";")?;
            writeln!(writer, "    fontsize=12;")?;
            writeln!(writer, "    penwidth=2;")?;
            writeln!(writer)?;

            for module in members {
                writeln!(
                    writer,
                    "    {} [fillcolor=\"{}\", style=\"{}\", color=\"{}\"];",
                    quote(module),
                    style.fill,
                    style.node_style,
                    style.border
                )?;
            }

            writeln!(writer, "  }}")?;
            writeln!(writer)?;
        }

        writeln!(writer, "  // Dependencies")?;
        let rules = &data.category_rules;
        for (module, deps) in &data.dependency_graph {
            for dep in deps {
                let edge_style = if module == dep {
                    " [color=red, style=dashed, penwidth=2, label=\"circular!\"]"
                } else if rules.is_core(dep) {
                    " [color=gray, penwidth=1]"
                } else if rules.has_ui_prefix(dep) {
                    " [color=blue, penwidth=1.5]"
                } else {
                    ""
                };

                writeln!(writer, "  {} -> {}{};", quote(module), quote(dep), edge_style)?;
            }
        }

        writeln!(writer, "}}")
    }
}
