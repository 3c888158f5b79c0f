// Location store - departments and wards joined by weighted corridors
use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

pub type LocationId = u64;
pub type Weight = u32;

/// One side of an undirected edge, as held in a location's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: LocationId,
    pub weight: Weight,
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    id: LocationId,
    name: String,
    kind: String,
    neighbors: SmallVec<[Neighbor; 4]>,
}

impl Location {
    #[inline]
    #[must_use]
    pub fn new(id: LocationId, name: String, kind: String) -> Self {
        Self {
            id,
            name,
            kind,
            neighbors: SmallVec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> LocationId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form tag such as "Department" or "Ward"
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    #[inline]
    pub fn weight_to(&self, id: LocationId) -> Option<Weight> {
        self.neighbors.iter().find(|n| n.id == id).map(|n| n.weight)
    }
}

/// Outcome of [`HospitalGraph::add_edge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    Added,
    Updated { previous: Weight },
}

/// Undirected weighted graph of hospital locations.
///
/// Locations live in an arena addressed by index. Ids are handed out by a
/// monotonically increasing counter and resolved through `id_to_index`;
/// adjacency lists hold ids, never indices.
///
/// Every edge is stored on both endpoints with the same weight. All mutation
/// goes through [`add_edge`](Self::add_edge) and
/// [`remove_edge`](Self::remove_edge), which keep the two sides in step.
#[derive(Debug, Clone, Default)]
pub struct HospitalGraph {
    locations: Vec<Location>,
    id_to_index: AHashMap<LocationId, usize>,
    counter: LocationId,
}

impl HospitalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location under the next free id.
    pub fn add_node(&mut self, name: impl Into<String>, kind: impl Into<String>) -> Result<LocationId> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.find_node_by_name(&name).is_some() {
            return Err(Error::NameExists(name));
        }

        self.counter += 1;
        let id = self.counter;
        debug!(id, name = %name, "location added");
        self.push(Location::new(id, name, kind.into()));
        Ok(id)
    }

    /// Re-insert a location under a known id, as read back from storage.
    /// The id counter moves forward so fresh ids never collide with it.
    pub fn restore_node(&mut self, id: LocationId, name: impl Into<String>, kind: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.id_to_index.contains_key(&id) {
            return Err(Error::IdExists(id));
        }
        if self.find_node_by_name(&name).is_some() {
            return Err(Error::NameExists(name));
        }

        self.counter = self.counter.max(id);
        self.push(Location::new(id, name, kind.into()));
        Ok(())
    }

    fn push(&mut self, location: Location) {
        self.id_to_index.insert(location.id, self.locations.len());
        self.locations.push(location);
    }

    #[inline]
    pub(crate) fn index_of(&self, id: LocationId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    #[inline]
    pub(crate) fn at(&self, index: usize) -> &Location {
        &self.locations[index]
    }

    #[inline]
    pub fn find_node(&self, id: LocationId) -> Option<&Location> {
        self.index_of(id).map(|idx| &self.locations[idx])
    }

    pub fn find_node_by_name(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.name == name)
    }

    fn resolve_pair(&self, from: LocationId, to: LocationId) -> Result<(usize, usize)> {
        match (self.index_of(from), self.index_of(to)) {
            (Some(f), Some(t)) => Ok((f, t)),
            (None, _) => Err(Error::LocationNotFound(from)),
            (_, None) => Err(Error::LocationNotFound(to)),
        }
    }

    /// Connect two locations, or overwrite the weight of an existing edge on
    /// both sides. A self-loop is kept as a single entry.
    pub fn add_edge(&mut self, from: LocationId, to: LocationId, weight: Weight) -> Result<EdgeChange> {
        let (fi, ti) = self.resolve_pair(from, to)?;

        if let Some(entry) = self.locations[fi].neighbors.iter_mut().find(|n| n.id == to) {
            let previous = entry.weight;
            entry.weight = weight;
            if let Some(back) = self.locations[ti].neighbors.iter_mut().find(|n| n.id == from) {
                back.weight = weight;
            }
            debug!(from, to, previous, weight, "edge weight updated");
            return Ok(EdgeChange::Updated { previous });
        }

        self.locations[fi].neighbors.push(Neighbor { id: to, weight });
        if fi != ti {
            self.locations[ti].neighbors.push(Neighbor { id: from, weight });
        }
        debug!(from, to, weight, "edge added");
        Ok(EdgeChange::Added)
    }

    pub fn add_edge_by_name(&mut self, from: &str, to: &str, weight: Weight) -> Result<EdgeChange> {
        let from_id = self
            .find_node_by_name(from)
            .map(Location::id)
            .ok_or_else(|| Error::NameNotFound(from.to_string()))?;
        let to_id = self
            .find_node_by_name(to)
            .map(Location::id)
            .ok_or_else(|| Error::NameNotFound(to.to_string()))?;

        self.add_edge(from_id, to_id, weight)
    }

    /// Disconnect two locations. Returns `false` when they were not connected.
    pub fn remove_edge(&mut self, from: LocationId, to: LocationId) -> Result<bool> {
        let (fi, ti) = self.resolve_pair(from, to)?;

        let before = self.locations[fi].neighbors.len();
        self.locations[fi].neighbors.retain(|n| n.id != to);
        let removed = self.locations[fi].neighbors.len() != before;
        self.locations[ti].neighbors.retain(|n| n.id != from);

        debug!(from, to, removed, "edge removed");
        Ok(removed)
    }

    #[inline]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn neighbors(&self, id: LocationId) -> Option<&[Neighbor]> {
        self.find_node(id).map(Location::neighbors)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Highest id handed out so far
    #[inline]
    pub fn last_id(&self) -> LocationId {
        self.counter
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        let mut ends = 0;
        let mut loops = 0;
        for loc in &self.locations {
            for n in &loc.neighbors {
                if n.id == loc.id {
                    loops += 1;
                } else {
                    ends += 1;
                }
            }
        }
        ends / 2 + loops
    }

    /// First pair (a, b) where a lists b but b does not list a with the
    /// same weight, if any.
    pub fn check_symmetry(&self) -> Option<(LocationId, LocationId)> {
        for loc in &self.locations {
            for n in &loc.neighbors {
                let mirrored = self
                    .find_node(n.id)
                    .and_then(|other| other.weight_to(loc.id))
                    .is_some_and(|w| w == n.weight);
                if !mirrored {
                    return Some((loc.id, n.id));
                }
            }
        }
        None
    }
}
