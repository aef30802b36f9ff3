//! JSON export implementation.
//!
//! Builds a serializable snapshot of a graph analysis: counts, root
//! candidates, cycle status, the propagated total with its evaluation
//! metrics, and every edge.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::graph::{CostGraph, GraphError};

/// One directed edge of the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Source project name.
    pub source: String,
    /// Destination project name.
    pub dest: String,
    /// Edge weight.
    pub weight: i64,
}

/// Cost result of an analysis.
///
/// The total is a decimal string: it is arbitrary precision and can
/// exceed any fixed-width JSON number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostSummary {
    /// Propagated total cost from the root, in decimal.
    pub total: String,
    /// Projects evaluated during the computation.
    pub evaluated: usize,
    /// Totals served from the memo cache.
    pub memo_hits: usize,
}

/// Serializable snapshot of a full graph analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Number of projects in the graph.
    pub project_count: usize,
    /// Number of edges in the graph.
    pub edge_count: usize,
    /// Names of projects no edge targets.
    pub root_candidates: Vec<String>,
    /// Whether the graph contains a directed cycle.
    pub has_cycle: bool,
    /// Cost result; absent when the graph is cyclic or has no unique root.
    pub cost: Option<CostSummary>,
    /// Why the cost is absent, when it is.
    pub error: Option<String>,
    /// Every edge, matching the adjacency contents.
    pub edges: Vec<EdgeRecord>,
}

impl AnalysisReport {
    /// Runs the analysis and collects the snapshot.
    ///
    /// The cycle scan runs first; cost propagation is only attempted on
    /// an acyclic graph, so a cyclic input reports the cycle instead of
    /// a cost.
    pub fn collect(graph: &mut CostGraph) -> Self {
        let has_cycle = graph.has_cycles();
        let (cost, error) = if has_cycle {
            (None, Some(GraphError::CycleDetected.to_string()))
        } else {
            match graph.total_cost_report() {
                Ok(report) => (
                    Some(CostSummary {
                        total: report.total.to_string(),
                        evaluated: report.evaluated,
                        memo_hits: report.memo_hits,
                    }),
                    None,
                ),
                Err(err) => (None, Some(err.to_string())),
            }
        };

        let mut root_candidates: Vec<String> = graph
            .root_candidates()
            .map(|node| node.name.clone())
            .collect();
        root_candidates.sort_unstable();

        let edges: Vec<EdgeRecord> = graph
            .edges()
            .map(|(source, edge)| EdgeRecord {
                source: source.to_string(),
                dest: edge.dest.clone(),
                weight: edge.weight,
            })
            .collect();

        Self {
            project_count: graph.project_count(),
            edge_count: graph.edge_count(),
            root_candidates,
            has_cycle,
            cost,
            error,
            edges,
        }
    }
}

/// Writes a report as pretty-printed JSON with a trailing newline.
pub fn write_report<W: Write>(report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}
