use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use costscope::export::{self, ExportFormat};
use costscope::graph::CostGraph;
use costscope::parser;

#[derive(Parser)]
#[command(name = "costscope")]
#[command(version = "0.1.0")]
#[command(about = "Dependency cost analyzer for project build graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project plan: roots, cycles, and total propagated cost
    Analyze {
        /// Path to the plan file
        path: PathBuf,
    },
    /// Render a project plan in another format
    Export {
        /// Path to the plan file
        path: PathBuf,

        /// Output format (dot, summary, json)
        #[arg(short, long, default_value = "dot")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze { path }) => analyze(&path),
        Some(Commands::Export {
            path,
            format,
            output,
        }) => run_export(&path, format, output.as_deref()),
        Some(Commands::Version) => {
            println!("costscope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("CostScope - dependency cost analyzer");
            println!("Run 'costscope analyze <plan>' to compute the total cost of a plan");
            println!("Run 'costscope --help' for more information");
            Ok(())
        }
    }
}

fn load_graph(path: &Path) -> Result<CostGraph> {
    let plan = parser::parse_file(path)
        .with_context(|| format!("failed to parse plan {}", path.display()))?;
    let graph = plan
        .build_graph()
        .context("failed to build the project graph")?;
    Ok(graph)
}

fn analyze(path: &Path) -> Result<()> {
    let started = Instant::now();
    let mut graph = load_graph(path)?;

    println!("Projects: {}", graph.project_count());
    println!("Dependencies: {}", graph.edge_count());

    if graph.has_cycles() {
        bail!("dependency cycle detected, total cost is undefined");
    }

    let report = graph
        .total_cost_report()
        .context("cost computation failed")?;
    println!("Total cost: {}", report.total);
    println!(
        "Evaluated {} projects ({} memo hits) in {}",
        report.evaluated,
        report.memo_hits,
        format_elapsed(started.elapsed())
    );
    Ok(())
}

fn run_export(path: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let mut graph = load_graph(path)?;
    let rendered = export::export_to_string(format, &mut graph).context("export failed")?;
    match output {
        Some(file) => fs::write(file, rendered)
            .with_context(|| format!("failed to write {}", file.display()))?,
        None => io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 1 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else if elapsed.as_millis() >= 1 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{}µs", elapsed.as_micros())
    }
}
