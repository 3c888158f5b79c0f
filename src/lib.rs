//! # wardgraph
//!
//! A hospital connectivity graph: departments and wards joined by weighted
//! corridors, kept in a flat text file and browsed from a console menu.
//!
//! ## Quick Start
//!
//! ### As a Console
//!
//! ```bash
//! wardgraph --data-file hospitalGraph.txt
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use wardgraph::prelude::*;
//!
//! let mut manager = GraphManager::open(ManagerConfig::default())?;
//! let lab = manager.add_node("Lab", "Department")?;
//! manager.add_edge_by_name("Lab", "Emergency", 4)?;
//!
//! if let Some(route) = manager.shortest_path(lab, 8)? {
//!     println!("{} ({} units)", route.names.join(" -> "), route.distance);
//! }
//! manager.close()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `wardgraph-core` - Location store, route finding, components, text reports
//! - `wardgraph-storage` - Text codec, graph file, default topology, [`GraphManager`]
//! - `wardgraph` - This crate: re-exports and the interactive console

pub mod console;

// Re-export core types
pub use wardgraph_core::{
    report, Component, EdgeChange, Error, HospitalGraph, Location, LocationId, Neighbor,
    PathStrategy, Result, Route, Weight,
};

// Re-export storage
pub use wardgraph_storage::{GraphFile, GraphManager, ManagerConfig, DEFAULT_DATA_FILE};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Component, EdgeChange, Error, GraphManager, HospitalGraph, Location, LocationId,
        ManagerConfig, PathStrategy, Route, Weight,
    };
}
