// Line-oriented text codec for the graph file
//
//   <id> |<name>|<kind>|      one line per location, store order
//   EDGES:
//   <from> <to> <weight>      one line per undirected edge
//
// Inside name and kind, `\` `|` newline and carriage return are written as
// `\\` `\|` `\n` `\r`. Files without escapes decode unchanged.

use ahash::AHashSet;
use tracing::warn;
use wardgraph_core::{HospitalGraph, LocationId, Weight};

pub const EDGE_SENTINEL: &str = "EDGES:";
const SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// What [`decode`] kept and dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    pub nodes: usize,
    /// Edge lines applied, duplicates included
    pub edges: usize,
    pub skipped: usize,
}

pub fn encode(graph: &HospitalGraph) -> String {
    let mut out = String::new();

    for loc in graph.iter() {
        out.push_str(&format!(
            "{} |{}|{}|\n",
            loc.id(),
            escape_field(loc.name()),
            escape_field(loc.kind())
        ));
    }

    out.push_str(EDGE_SENTINEL);
    out.push('\n');

    let mut seen: AHashSet<(LocationId, LocationId)> = AHashSet::new();
    for loc in graph.iter() {
        for n in loc.neighbors() {
            let key = (loc.id().min(n.id), loc.id().max(n.id));
            if seen.insert(key) {
                out.push_str(&format!("{} {} {}\n", loc.id(), n.id, n.weight));
            }
        }
    }

    out
}

/// Rebuild a graph from its text form. Lines that do not parse, or that
/// name unknown or duplicate locations, are skipped.
pub fn decode(text: &str) -> (HospitalGraph, DecodeStats) {
    let mut graph = HospitalGraph::new();
    let mut stats = DecodeStats::default();
    let mut lines = text.lines().enumerate();

    for (idx, line) in lines.by_ref() {
        if line.trim() == EDGE_SENTINEL {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some((id, name, kind)) = parse_node_line(line) else {
            warn!(line = idx + 1, "skipping malformed location line");
            stats.skipped += 1;
            continue;
        };
        match graph.restore_node(id, name, kind) {
            Ok(()) => stats.nodes += 1,
            Err(e) => {
                warn!(line = idx + 1, error = %e, "skipping location line");
                stats.skipped += 1;
            }
        }
    }

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let Some((from, to, weight)) = parse_edge_line(line) else {
            warn!(line = idx + 1, "skipping malformed edge line");
            stats.skipped += 1;
            continue;
        };
        match graph.add_edge(from, to, weight) {
            Ok(_) => stats.edges += 1,
            Err(e) => {
                warn!(line = idx + 1, error = %e, "skipping edge line");
                stats.skipped += 1;
            }
        }
    }

    (graph, stats)
}

fn parse_node_line(line: &str) -> Option<(LocationId, String, String)> {
    let (head, rest) = line.split_once(SEPARATOR)?;
    let id: LocationId = head.trim().parse().ok()?;
    if id == 0 {
        return None;
    }

    let (name, rest) = read_field(rest);
    let rest = rest?;
    if name.is_empty() {
        return None;
    }
    let (kind, _) = read_field(rest);

    Some((id, name, kind))
}

fn parse_edge_line(line: &str) -> Option<(LocationId, LocationId, Weight)> {
    let mut parts = line.split_whitespace();
    let from = parts.next()?.parse().ok()?;
    let to = parts.next()?.parse().ok()?;
    let weight = parts.next()?.parse().ok()?;
    Some((from, to, weight))
}

fn escape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ESCAPE => out.push_str("\\\\"),
            SEPARATOR => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Read up to the next unescaped separator. The second value is the input
/// after that separator, or `None` if the line ran out first.
fn read_field(input: &str) -> (String, Option<&str>) {
    let mut field = String::new();
    let mut chars = input.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some((_, 'n')) => field.push('\n'),
                Some((_, 'r')) => field.push('\r'),
                Some((_, other)) => field.push(other),
                None => field.push(ESCAPE),
            },
            SEPARATOR => return (field, Some(&input[pos + c.len_utf8()..])),
            other => field.push(other),
        }
    }

    (field, None)
}
