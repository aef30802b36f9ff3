//! Export functionality for graph analysis results.
//!
//! This module renders a built graph in one of three formats: Graphviz
//! DOT, the human-readable summary listing, or a machine-readable JSON
//! analysis report.

pub mod json;

use std::io::{self, Write};

use crate::graph::CostGraph;

use json::AnalysisReport;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT notation - one line per edge
    Dot,
    /// Summary listing - root candidates and adjacency
    Summary,
    /// JSON format - machine-readable, full analysis
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            "summary" => Ok(ExportFormat::Summary),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: dot, summary, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Dot => write!(f, "dot"),
            ExportFormat::Summary => write!(f, "summary"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Render the graph in the given format to a writer.
///
/// The JSON format runs the full analysis (cycle scan, then cost when
/// the graph is acyclic with a single root), so the graph is taken
/// mutably; DOT and summary are straight renderings of the adjacency.
pub fn export<W: Write>(
    format: ExportFormat,
    graph: &mut CostGraph,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Dot => writer.write_all(graph.to_dot().as_bytes()),
        ExportFormat::Summary => writer.write_all(graph.to_string().as_bytes()),
        ExportFormat::Json => json::write_report(&AnalysisReport::collect(graph), writer),
    }
}

/// Render the graph in the given format to a string.
pub fn export_to_string(format: ExportFormat, graph: &mut CostGraph) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, graph, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
