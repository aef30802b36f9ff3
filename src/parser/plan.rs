//! Parser for the line-oriented project plan format.
//!
//! This module turns a plan file into a [`Plan`], an ordered list of
//! project and dependency declarations plus the sizing hint from the
//! header line, which can then be replayed into a
//! [`CostGraph`](crate::graph::CostGraph).

use std::fs;
use std::path::Path;

use crate::graph::{CostGraph, GraphError};

/// Errors that can occur while parsing a plan.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("failed to read plan file: {0}")]
    Io(#[from] std::io::Error),

    /// No leading project-count line before the first declaration.
    #[error("plan is missing the leading project-count line")]
    MissingHeader,

    /// A line matched neither a project nor a dependency declaration.
    #[error("line {line}: unrecognized statement '{content}'")]
    InvalidLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// A numeric token did not fit a 64-bit integer.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// One declaration from a plan file, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEntry {
    /// `NAME COST` line: a project with an intrinsic cost.
    Project {
        /// Project name.
        name: String,
        /// Intrinsic cost.
        cost: i64,
    },
    /// `NAME NAME WEIGHT` line: a weighted dependency edge.
    Dependency {
        /// Source project name.
        source: String,
        /// Destination project name.
        dest: String,
        /// Edge weight.
        weight: i64,
    },
}

/// A parsed plan: the sizing hint and the declarations in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Project count from the header line, used to size the graph.
    pub project_hint: usize,
    /// Declarations in the order they appeared.
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    /// Replays the plan's declarations into a fresh [`CostGraph`].
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError::ProjectNotFound`] when a dependency
    /// references a name no project declared.
    ///
    /// # Example
    ///
    /// ```rust
    /// use costscope::parser;
    /// use num_bigint::BigInt;
    ///
    /// let plan = parser::parse_str("3\nA 1\nB 2\nC 3\nA B 2\nB C 3\n").unwrap();
    /// let mut graph = plan.build_graph().unwrap();
    /// assert_eq!(graph.total_cost().unwrap(), BigInt::from(23));
    /// ```
    pub fn build_graph(&self) -> Result<CostGraph, GraphError> {
        let mut graph = CostGraph::with_capacity(self.project_hint);
        for entry in &self.entries {
            match entry {
                PlanEntry::Project { name, cost } => graph.add_project(name.clone(), *cost),
                PlanEntry::Dependency {
                    source,
                    dest,
                    weight,
                } => graph.add_dependency(source, dest, *weight)?,
            }
        }
        Ok(graph)
    }

    /// Number of project declarations in the plan.
    pub fn project_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, PlanEntry::Project { .. }))
            .count()
    }

    /// Number of dependency declarations in the plan.
    pub fn dependency_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, PlanEntry::Dependency { .. }))
            .count()
    }
}

/// Parses a plan file from a file path.
pub fn parse_file(path: &Path) -> ParseResult<Plan> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a plan from a string.
///
/// Blank lines are skipped. Bare integer lines after the first are
/// ignored; some inputs repeat the count as a section marker. Any other
/// unrecognized line is an error rather than being silently dropped.
pub fn parse_str(content: &str) -> ParseResult<Plan> {
    let mut hint: Option<usize> = None;
    let mut entries = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [count] if is_number(count) => {
                if hint.is_none() {
                    hint = Some(parse_number(count, line_no)? as usize);
                }
            }
            [name, cost] if is_name(name) && is_number(cost) => {
                if hint.is_none() {
                    return Err(ParseError::MissingHeader);
                }
                entries.push(PlanEntry::Project {
                    name: (*name).to_string(),
                    cost: parse_number(cost, line_no)?,
                });
            }
            [source, dest, weight]
                if is_name(source) && is_name(dest) && is_number(weight) =>
            {
                if hint.is_none() {
                    return Err(ParseError::MissingHeader);
                }
                entries.push(PlanEntry::Dependency {
                    source: (*source).to_string(),
                    dest: (*dest).to_string(),
                    weight: parse_number(weight, line_no)?,
                });
            }
            _ => {
                return Err(ParseError::InvalidLine {
                    line: line_no,
                    content: line.to_string(),
                })
            }
        }
    }

    match hint {
        Some(project_hint) => Ok(Plan {
            project_hint,
            entries,
        }),
        None => Err(ParseError::MissingHeader),
    }
}

fn is_name(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_uppercase())
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn parse_number(token: &str, line_no: usize) -> ParseResult<i64> {
    token.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        token: token.to_string(),
    })
}
