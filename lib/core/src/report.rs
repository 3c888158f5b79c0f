//! Plain-text views of the graph for the console.
//!
//! Each function writes to any [`std::io::Write`], so the console passes
//! stdout and tests pass a `Vec<u8>`. Lookups that miss print a message and
//! still return `Ok`.

use crate::graph::{HospitalGraph, Location, LocationId};
use crate::traversal::PathStrategy;
use crate::{Error, Result};
use std::io::Write;

const RULE: &str = "=====================================";

/// Kind tag picked out by [`department_connections`]
pub const DEPARTMENT: &str = "Department";

pub fn view_graph<W: Write>(out: &mut W, graph: &HospitalGraph) -> Result<()> {
    writeln!(out, "========== HOSPITAL GRAPH ==========\n")?;

    if graph.is_empty() {
        writeln!(out, "Graph is empty.")?;
        return Ok(());
    }

    for loc in graph.iter() {
        writeln!(out, "\n----------------------------------------")?;
        writeln!(out, "Node ID: {}", loc.id())?;
        writeln!(out, "Name: {}", loc.name())?;
        writeln!(out, "Type: {}", loc.kind())?;
        writeln!(out, "Connections:")?;
        if loc.neighbors().is_empty() {
            writeln!(out, "  No connections")?;
        } else {
            write_neighbors(out, graph, loc, "  -> ")?;
        }
    }

    writeln!(out, "\n{RULE}")?;
    Ok(())
}

pub fn view_node<W: Write>(out: &mut W, graph: &HospitalGraph, id: LocationId) -> Result<()> {
    let Some(loc) = graph.find_node(id) else {
        writeln!(out, "\nNode with ID {id} not found!")?;
        return Ok(());
    };

    writeln!(out, "\n========== NODE DETAILS ==========")?;
    writeln!(out, "Node ID: {}", loc.id())?;
    writeln!(out, "Name: {}", loc.name())?;
    writeln!(out, "Type: {}", loc.kind())?;
    writeln!(out, "Number of Connections: {}", loc.neighbors().len())?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

pub fn view_connections<W: Write>(out: &mut W, graph: &HospitalGraph, id: LocationId) -> Result<()> {
    let Some(loc) = graph.find_node(id) else {
        writeln!(out, "\nNode with ID {id} not found!")?;
        return Ok(());
    };

    writeln!(out, "\n========== CONNECTIONS FOR {} ==========", loc.name())?;
    if loc.neighbors().is_empty() {
        writeln!(out, "No connections.")?;
    } else {
        write_neighbors(out, graph, loc, "-> ")?;
    }
    writeln!(out, "==========================================")?;
    Ok(())
}

/// Connections of every location tagged [`DEPARTMENT`], in store order.
pub fn department_connections<W: Write>(out: &mut W, graph: &HospitalGraph) -> Result<()> {
    writeln!(out, "========== DEPARTMENT CONNECTIONS ==========\n")?;

    for loc in graph.iter().filter(|loc| loc.kind() == DEPARTMENT) {
        writeln!(out, "\n{}:", loc.name())?;
        view_connections(out, graph, loc.id())?;
    }

    writeln!(out, "\n==========================================")?;
    Ok(())
}

pub fn shortest_path<W: Write>(
    out: &mut W,
    graph: &HospitalGraph,
    from: LocationId,
    to: LocationId,
    strategy: PathStrategy,
) -> Result<()> {
    let route = match graph.shortest_path(from, to, strategy) {
        Ok(route) => route,
        Err(Error::InvalidIds { .. }) => {
            writeln!(out, "\nInvalid node IDs!")?;
            return Ok(());
        }
        Err(Error::SameEndpoints(_)) => {
            writeln!(out, "\nSource and destination are the same!")?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    // Both ids resolved above
    let name_of = |id| graph.find_node(id).map(Location::name).unwrap_or_default();

    let Some(route) = route else {
        writeln!(out, "\nNo path found between {} and {}!", name_of(from), name_of(to))?;
        return Ok(());
    };

    writeln!(out, "\n========== SHORTEST PATH ==========")?;
    writeln!(out, "From: {}", name_of(from))?;
    writeln!(out, "To: {}", name_of(to))?;
    writeln!(out, "Distance: {} units", route.distance)?;
    writeln!(out, "Path: {}", route.names.join(" -> "))?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

pub fn connected_components<W: Write>(out: &mut W, graph: &HospitalGraph) -> Result<()> {
    let components = graph.connected_components();
    for component in &components {
        writeln!(out, "\nComponent {}:", component.index)?;
        for name in &component.names {
            writeln!(out, "  - {name}")?;
        }
    }
    writeln!(out, "\nTotal Connected Components: {}", components.len())?;
    Ok(())
}

fn write_neighbors<W: Write>(out: &mut W, graph: &HospitalGraph, loc: &Location, prefix: &str) -> Result<()> {
    for n in loc.neighbors() {
        let name = graph.find_node(n.id).map(Location::name).unwrap_or("?");
        writeln!(out, "{prefix}{name} (Distance: {})", n.weight)?;
    }
    Ok(())
}
