//! CostScope - dependency cost analyzer for project build graphs
//!
//! This crate models a directed, weighted graph of named projects, each
//! carrying an intrinsic cost, and computes the total propagated cost of
//! the graph from its single root, with cycle detection and export to
//! Graphviz DOT, a summary listing, and JSON.

pub mod export;
pub mod graph;
pub mod parser;
pub mod store;
