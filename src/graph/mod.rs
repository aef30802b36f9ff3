//! Graph module for rooted cost propagation.
//!
//! This module provides the [`CostGraph`] struct for building a directed,
//! weighted dependency graph of named projects and computing its total
//! propagated cost from the single root.
//!
//! # Example
//!
//! ```rust
//! use costscope::graph::CostGraph;
//! use num_bigint::BigInt;
//!
//! let mut graph = CostGraph::new();
//! graph.add_project("APP", 1);
//! graph.add_project("CORE", 2);
//! graph.add_dependency("APP", "CORE", 3).unwrap();
//!
//! assert!(!graph.has_cycles());
//! assert_eq!(graph.total_cost().unwrap(), BigInt::from(7));
//! ```

mod cost_graph;

pub use cost_graph::{CostGraph, CostReport, GraphError, ProjectEdge, ProjectNode};
