// Route finding and connected components over the location graph
use crate::graph::{HospitalGraph, LocationId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// How [`HospitalGraph::shortest_path`] picks a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStrategy {
    /// Minimum total weight (Dijkstra)
    #[default]
    LeastWeight,
    /// Breadth-first: the route with the fewest hops, reported with the
    /// weight summed along it. Only weight-optimal when all weights match.
    FewestHops,
}

impl FromStr for PathStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "least-weight" | "weighted" | "dijkstra" => Ok(Self::LeastWeight),
            "fewest-hops" | "hops" | "bfs" => Ok(Self::FewestHops),
            other => Err(format!(
                "unknown path strategy '{other}' (expected least-weight or fewest-hops)"
            )),
        }
    }
}

impl fmt::Display for PathStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeastWeight => f.write_str("least-weight"),
            Self::FewestHops => f.write_str("fewest-hops"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub ids: Vec<LocationId>,
    pub names: Vec<String>,
    pub distance: u64,
}

impl Route {
    #[inline]
    pub fn hops(&self) -> usize {
        self.ids.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// 1-based position in discovery order
    pub index: usize,
    pub ids: Vec<LocationId>,
    pub names: Vec<String>,
}

impl HospitalGraph {
    /// Find a route between two distinct locations.
    ///
    /// Returns `Ok(None)` when the two are not connected.
    pub fn shortest_path(
        &self,
        from: LocationId,
        to: LocationId,
        strategy: PathStrategy,
    ) -> Result<Option<Route>> {
        let (Some(src), Some(dst)) = (self.index_of(from), self.index_of(to)) else {
            return Err(Error::InvalidIds { from, to });
        };
        if src == dst {
            return Err(Error::SameEndpoints(from));
        }

        let found = match strategy {
            PathStrategy::FewestHops => self.fewest_hops(src, dst),
            PathStrategy::LeastWeight => self.least_weight(src, dst),
        };

        Ok(found.map(|(parent, distance)| {
            let indices = trace_back(&parent, dst);
            Route {
                ids: indices.iter().map(|&i| self.at(i).id()).collect(),
                names: indices.iter().map(|&i| self.at(i).name().to_string()).collect(),
                distance,
            }
        }))
    }

    fn fewest_hops(&self, src: usize, dst: usize) -> Option<(Vec<Option<usize>>, u64)> {
        let n = self.len();
        let mut visited = vec![false; n];
        let mut parent = vec![None; n];
        let mut distance: Vec<Option<u64>> = vec![None; n];
        let mut queue = VecDeque::new();

        visited[src] = true;
        distance[src] = Some(0);
        queue.push_back((src, 0u64));

        while let Some((current, travelled)) = queue.pop_front() {
            if current == dst {
                break;
            }
            for neighbor in self.at(current).neighbors() {
                let Some(next) = self.index_of(neighbor.id) else {
                    continue;
                };
                if !visited[next] {
                    visited[next] = true;
                    let total = travelled + u64::from(neighbor.weight);
                    distance[next] = Some(total);
                    parent[next] = Some(current);
                    queue.push_back((next, total));
                }
            }
        }

        distance[dst].map(|d| (parent, d))
    }

    fn least_weight(&self, src: usize, dst: usize) -> Option<(Vec<Option<usize>>, u64)> {
        let n = self.len();
        let mut settled = vec![false; n];
        let mut parent = vec![None; n];
        let mut best: Vec<Option<u64>> = vec![None; n];
        // (distance, discovery sequence, index): equal distances pop in discovery order
        let mut heap = BinaryHeap::new();
        let mut sequence = 0usize;

        best[src] = Some(0);
        heap.push(Reverse((0u64, sequence, src)));

        while let Some(Reverse((travelled, _, current))) = heap.pop() {
            if settled[current] {
                continue;
            }
            settled[current] = true;
            if current == dst {
                return Some((parent, travelled));
            }

            for neighbor in self.at(current).neighbors() {
                let Some(next) = self.index_of(neighbor.id) else {
                    continue;
                };
                if settled[next] {
                    continue;
                }
                let candidate = travelled + u64::from(neighbor.weight);
                if best[next].map_or(true, |b| candidate < b) {
                    best[next] = Some(candidate);
                    parent[next] = Some(current);
                    sequence += 1;
                    heap.push(Reverse((candidate, sequence, next)));
                }
            }
        }

        None
    }

    /// Group locations into connected components.
    ///
    /// Locations are scanned in store order; each unvisited one starts a new
    /// component, expanded depth-first with an explicit stack. Members are
    /// listed in store order and only the locations discovered in that pass
    /// are included.
    pub fn connected_components(&self) -> Vec<Component> {
        let n = self.len();
        let mut visited = vec![false; n];
        let mut components = Vec::new();
        let mut stack = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            stack.push(start);

            let mut members = Vec::new();
            while let Some(current) = stack.pop() {
                members.push(current);
                for neighbor in self.at(current).neighbors().iter().rev() {
                    if let Some(next) = self.index_of(neighbor.id) {
                        if !visited[next] {
                            visited[next] = true;
                            stack.push(next);
                        }
                    }
                }
            }
            members.sort_unstable();

            components.push(Component {
                index: components.len() + 1,
                ids: members.iter().map(|&i| self.at(i).id()).collect(),
                names: members.iter().map(|&i| self.at(i).name().to_string()).collect(),
            });
        }

        components
    }
}

fn trace_back(parent: &[Option<usize>], dst: usize) -> Vec<usize> {
    let mut path = vec![dst];
    let mut current = dst;
    while let Some(prev) = parent[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
