// Default hospital layout used when no graph file could be loaded
use crate::manager::GraphManager;
use anyhow::Result;
use tracing::info;
use wardgraph_core::Weight;

pub const DEFAULT_LOCATIONS: [(&str, &str); 8] = [
    ("Emergency", "Department"),
    ("Cardiology", "Department"),
    ("Pediatrics", "Department"),
    ("Surgery", "Department"),
    ("Pharmacy", "Department"),
    ("Ward A", "Ward"),
    ("Ward B", "Ward"),
    ("ICU", "Ward"),
];

pub const DEFAULT_CORRIDORS: [(&str, &str, Weight); 7] = [
    ("Emergency", "Cardiology", 5),
    ("Emergency", "Surgery", 3),
    ("Cardiology", "Ward A", 2),
    ("Surgery", "ICU", 4),
    ("Pediatrics", "Ward B", 3),
    ("Pharmacy", "Ward A", 6),
    ("Pharmacy", "Ward B", 6),
];

/// Add the default locations and corridors through the manager, so each
/// step is saved like any other mutation.
pub fn seed_default_topology(manager: &mut GraphManager) -> Result<()> {
    for (name, kind) in DEFAULT_LOCATIONS {
        manager.add_node(name, kind)?;
    }
    for (from, to, weight) in DEFAULT_CORRIDORS {
        manager.add_edge_by_name(from, to, weight)?;
    }

    info!(
        nodes = DEFAULT_LOCATIONS.len(),
        edges = DEFAULT_CORRIDORS.len(),
        "sample graph data initialized"
    );
    Ok(())
}
