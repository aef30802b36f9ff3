//! Fixed-capacity associative store backing the graph indices.
//!
//! This module provides the [`ChainedMap`] struct, a separate-chaining
//! hash table whose bucket count is fixed at construction. Every index
//! inside the cost graph (vertices, adjacency, root candidates) is built
//! on top of it.
//!
//! # Example
//!
//! ```rust
//! use costscope::store::ChainedMap;
//!
//! let mut index: ChainedMap<String, i64> = ChainedMap::with_capacity(9);
//! index.insert("CORE".to_string(), 10);
//! index.insert("LIBS".to_string(), 4);
//!
//! assert_eq!(index.get("CORE"), Some(&10));
//! assert_eq!(index.len(), 2);
//! ```

mod chained_map;

pub use chained_map::{ChainStats, ChainedMap};
