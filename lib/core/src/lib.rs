//! # wardgraph Core
//!
//! Core library for the wardgraph hospital connectivity graph.
//!
//! This crate provides the in-memory graph and the algorithms over it:
//!
//! - [`Location`] - A department or ward with its adjacency list
//! - [`HospitalGraph`] - Location store that keeps every edge symmetric
//! - [`PathStrategy`] / [`Route`] - Shortest-path queries
//! - [`Component`] - Connected component discovery
//! - [`report`] - Plain-text views used by the console
//!
//! ## Example
//!
//! ```rust
//! use wardgraph_core::{HospitalGraph, PathStrategy};
//!
//! let mut graph = HospitalGraph::new();
//! let er = graph.add_node("Emergency", "Department").unwrap();
//! let surgery = graph.add_node("Surgery", "Department").unwrap();
//! let icu = graph.add_node("ICU", "Ward").unwrap();
//! graph.add_edge(er, surgery, 3).unwrap();
//! graph.add_edge(surgery, icu, 4).unwrap();
//!
//! let route = graph.shortest_path(er, icu, PathStrategy::LeastWeight).unwrap().unwrap();
//! assert_eq!(route.distance, 7);
//! assert_eq!(route.names, vec!["Emergency", "Surgery", "ICU"]);
//! ```

pub mod error;
pub mod graph;
pub mod traversal;
pub mod report;

pub use error::{Error, Result};
pub use graph::{EdgeChange, HospitalGraph, Location, LocationId, Neighbor, Weight};
pub use traversal::{Component, PathStrategy, Route};
