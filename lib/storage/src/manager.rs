use crate::persistence::GraphFile;
use crate::seed;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wardgraph_core::{
    Component, EdgeChange, HospitalGraph, LocationId, PathStrategy, Route, Weight,
};

pub const DEFAULT_DATA_FILE: &str = "hospitalGraph.txt";

/// Configuration for a [`GraphManager`]
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub data_file: PathBuf,
    pub path_strategy: PathStrategy,
    /// Seed the default topology when the loaded graph is empty
    pub seed_when_empty: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            path_strategy: PathStrategy::default(),
            seed_when_empty: true,
        }
    }
}

/// Owns the graph and its file for the whole session.
///
/// Every successful call into the store is followed by a full save. Calls the
/// store rejects leave the graph and the file untouched and hand the
/// [`wardgraph_core::Error`] back inside the `anyhow::Error`. A change whose
/// save fails is undone before the error is returned.
pub struct GraphManager {
    graph: HospitalGraph,
    file: GraphFile,
    config: ManagerConfig,
}

impl GraphManager {
    /// Load the graph file, seeding the default topology if nothing usable
    /// was found.
    pub fn open(config: ManagerConfig) -> Result<Self> {
        let file = GraphFile::new(&config.data_file);

        let graph = match file.load()? {
            Some((graph, stats)) => {
                info!(
                    path = ?file.path(),
                    nodes = stats.nodes,
                    edges = stats.edges,
                    skipped = stats.skipped,
                    "graph loaded"
                );
                if stats.skipped > 0 {
                    warn!(skipped = stats.skipped, "graph file had unreadable lines");
                }
                graph
            }
            None => {
                info!(path = ?file.path(), "no graph file yet");
                HospitalGraph::new()
            }
        };

        let mut manager = Self { graph, file, config };
        if manager.graph.is_empty() && manager.config.seed_when_empty {
            seed::seed_default_topology(&mut manager)?;
        }

        Ok(manager)
    }

    pub fn add_node(&mut self, name: &str, kind: &str) -> Result<LocationId> {
        self.apply(|graph| graph.add_node(name, kind))
    }

    pub fn add_edge(&mut self, from: LocationId, to: LocationId, weight: Weight) -> Result<EdgeChange> {
        self.apply(|graph| graph.add_edge(from, to, weight))
    }

    pub fn add_edge_by_name(&mut self, from: &str, to: &str, weight: Weight) -> Result<EdgeChange> {
        self.apply(|graph| graph.add_edge_by_name(from, to, weight))
    }

    /// Returns `false` when the two locations were not connected. The file is
    /// rewritten either way.
    pub fn remove_edge(&mut self, from: LocationId, to: LocationId) -> Result<bool> {
        self.apply(|graph| graph.remove_edge(from, to))
    }

    /// Run one store mutation and save. If the save fails the graph is put
    /// back as it was, so memory never runs ahead of the file.
    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut HospitalGraph) -> wardgraph_core::Result<T>,
    ) -> Result<T> {
        let before = self.graph.clone();
        let value = op(&mut self.graph)?;

        if let Err(e) = self.flush() {
            self.graph = before;
            warn!(path = ?self.file.path(), error = %e, "save failed, change rolled back");
            return Err(e.context("change not saved and rolled back"));
        }
        Ok(value)
    }

    pub fn shortest_path(&self, from: LocationId, to: LocationId) -> wardgraph_core::Result<Option<Route>> {
        self.graph.shortest_path(from, to, self.config.path_strategy)
    }

    pub fn connected_components(&self) -> Vec<Component> {
        self.graph.connected_components()
    }

    #[inline]
    pub fn graph(&self) -> &HospitalGraph {
        &self.graph
    }

    #[inline]
    pub fn path_strategy(&self) -> PathStrategy {
        self.config.path_strategy
    }

    #[inline]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write the whole graph to disk
    pub fn flush(&self) -> Result<()> {
        self.file.save(&self.graph)
    }

    /// Final save at the end of a session
    pub fn close(self) -> Result<()> {
        self.flush()?;
        info!(path = ?self.file.path(), "graph closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wardgraph_core::Error;

    fn config_in(dir: &Path) -> ManagerConfig {
        ManagerConfig {
            data_file: dir.join(DEFAULT_DATA_FILE),
            seed_when_empty: false,
            ..Default::default()
        }
    }

    fn file_text(manager: &GraphManager) -> String {
        std::fs::read_to_string(manager.path()).unwrap()
    }

    #[test]
    fn test_every_mutation_is_saved() {
        let dir = tempdir().unwrap();
        let mut manager = GraphManager::open(config_in(dir.path())).unwrap();
        assert!(!manager.path().exists());

        manager.add_node("Emergency", "Department").unwrap();
        assert_eq!(file_text(&manager), "1 |Emergency|Department|\nEDGES:\n");

        manager.add_node("ICU", "Ward").unwrap();
        manager.add_edge(1, 2, 4).unwrap();
        assert!(file_text(&manager).ends_with("EDGES:\n1 2 4\n"));

        manager.add_edge(2, 1, 6).unwrap();
        assert!(file_text(&manager).ends_with("EDGES:\n1 2 6\n"));

        assert!(manager.remove_edge(1, 2).unwrap());
        assert!(file_text(&manager).ends_with("EDGES:\n"));
    }

    #[test]
    fn test_rejected_call_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let mut manager = GraphManager::open(config_in(dir.path())).unwrap();
        manager.add_node("Emergency", "Department").unwrap();
        let before = file_text(&manager);

        let err = manager.add_node("Emergency", "Ward").unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NameExists(_))));

        let err = manager.add_edge(1, 5, 2).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::LocationNotFound(5))));

        let err = manager.add_edge_by_name("Emergency", "Nowhere", 2).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NameNotFound(_))));

        assert_eq!(file_text(&manager), before);
        assert_eq!(manager.graph().len(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let dir = tempdir().unwrap();
        let mut manager = GraphManager::open(ManagerConfig {
            data_file: dir.path().join("missing").join(DEFAULT_DATA_FILE),
            seed_when_empty: false,
            ..Default::default()
        })
        .unwrap();

        let err = manager.add_node("Lab", "Department").unwrap_err();
        assert!(err.downcast_ref::<Error>().is_none());
        assert!(manager.graph().is_empty());
        assert_eq!(manager.graph().last_id(), 0);

        std::fs::create_dir(dir.path().join("missing")).unwrap();
        assert_eq!(manager.add_node("Lab", "Department").unwrap(), 1);
        manager.add_node("ICU", "Ward").unwrap();
        manager.add_edge(1, 2, 4).unwrap();

        std::fs::remove_dir_all(dir.path().join("missing")).unwrap();
        assert!(manager.remove_edge(1, 2).is_err());
        assert!(manager.add_edge(1, 2, 9).is_err());
        assert!(manager.add_edge_by_name("Lab", "ICU", 9).is_err());
        assert_eq!(manager.graph().find_node(1).unwrap().weight_to(2), Some(4));
        assert!(manager.graph().check_symmetry().is_none());
    }

    #[test]
    fn test_reopen_restores_state() {
        let dir = tempdir().unwrap();
        {
            let mut manager = GraphManager::open(config_in(dir.path())).unwrap();
            manager.add_node("A", "Ward").unwrap();
            manager.add_node("B", "Ward").unwrap();
            manager.add_edge_by_name("A", "B", 3).unwrap();
            manager.close().unwrap();
        }

        let mut manager = GraphManager::open(config_in(dir.path())).unwrap();
        assert_eq!(manager.graph().len(), 2);
        assert_eq!(manager.graph().find_node(1).unwrap().weight_to(2), Some(3));
        assert_eq!(manager.add_node("C", "Ward").unwrap(), 3);
    }

    #[test]
    fn test_queries_use_configured_strategy() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.path_strategy = PathStrategy::FewestHops;
        let mut manager = GraphManager::open(config).unwrap();
        for name in ["A", "B", "C"] {
            manager.add_node(name, "Ward").unwrap();
        }
        manager.add_edge(1, 3, 10).unwrap();
        manager.add_edge(1, 2, 1).unwrap();
        manager.add_edge(2, 3, 1).unwrap();

        assert_eq!(manager.path_strategy(), PathStrategy::FewestHops);
        let route = manager.shortest_path(1, 3).unwrap().unwrap();
        assert_eq!(route.ids, vec![1, 3]);
        assert_eq!(route.distance, 10);
        assert_eq!(manager.connected_components().len(), 1);
    }
}
