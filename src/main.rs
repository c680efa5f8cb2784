use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use modscope::export::{export_to_file, export_to_string};
use modscope::logger::init_logger;
use modscope::{Analyzer, Config, ExportData, ExportFormat};

#[derive(Parser)]
#[command(name = "modscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Module dependency graph analyzer: cycles, build order and Graphviz/JSON export", long_about = None)]
struct Cli {
    /// Directory whose subdirectories are the modules to analyze
    #[arg(long, default_value = "../SubModules")]
    root: PathBuf,

    /// Output path for the Graphviz DOT graph
    #[arg(long, default_value = "dependency_graph.dot")]
    output_dot: PathBuf,

    /// Output path for the JSON data file
    #[arg(long, default_value = "dependency_data.json")]
    output_json: PathBuf,

    /// Print the report only, skip writing the DOT and JSON files
    #[arg(long)]
    no_exports: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source file extension to scan (repeatable, replaces the configured set)
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if !cli.extensions.is_empty() {
        config.scan.extensions = cli.extensions.iter().cloned().collect();
        config.validate().context("invalid --extension value")?;
    }

    Ok(config)
}

fn write_export(format: ExportFormat, data: &ExportData, path: &Path) -> Result<()> {
    export_to_file(format, data, path)
        .with_context(|| format!("failed to write {} export to {}", format, path.display()))?;
    info!(path = %path.display(), "wrote {} export", format);
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let analysis = Analyzer::new(config)
        .run(&cli.root)
        .with_context(|| format!("failed to analyze {}", cli.root.display()))?;

    let data = ExportData::new(&analysis);
    let report = export_to_string(ExportFormat::Text, &data).context("failed to render report")?;
    print!("{}", report);

    if cli.no_exports {
        return Ok(());
    }

    write_export(ExportFormat::Dot, &data, &cli.output_dot)?;
    write_export(ExportFormat::Json, &data, &cli.output_json)?;

    println!();
    println!("📁 Files generated:");
    println!("   Graphviz: {}", cli.output_dot.display());
    println!("   JSON:     {}", cli.output_json.display());
    println!();
    println!("To render the graph:");
    println!(
        "   dot -Tsvg {} -o dependency_graph.svg",
        cli.output_dot.display()
    );

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
