// Integration tests for wardgraph
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use wardgraph::prelude::*;
use wardgraph::DEFAULT_DATA_FILE;
use wardgraph_storage::{decode, encode};

fn edge_set(graph: &HospitalGraph) -> BTreeSet<(LocationId, LocationId, Weight)> {
    graph
        .iter()
        .flat_map(|loc| {
            loc.neighbors()
                .iter()
                .map(move |n| (loc.id().min(n.id), loc.id().max(n.id), n.weight))
        })
        .collect()
}

fn node_set(graph: &HospitalGraph) -> Vec<(LocationId, String, String)> {
    graph
        .iter()
        .map(|l| (l.id(), l.name().to_string(), l.kind().to_string()))
        .collect()
}

fn random_graph(rng: &mut StdRng, nodes: usize, edges: usize) -> HospitalGraph {
    let mut graph = HospitalGraph::new();
    for i in 0..nodes {
        let kind = if i % 3 == 0 { "Ward" } else { "Department" };
        graph.add_node(format!("Location {i}"), kind).unwrap();
    }
    for _ in 0..edges {
        let a = rng.random_range(1..=nodes as u64);
        let b = rng.random_range(1..=nodes as u64);
        graph.add_edge(a, b, rng.random_range(0..50)).unwrap();
    }
    graph
}

fn open_empty(dir: &std::path::Path) -> GraphManager {
    GraphManager::open(ManagerConfig {
        data_file: dir.join(DEFAULT_DATA_FILE),
        seed_when_empty: false,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_emergency_to_icu_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_empty(dir.path());
    for name in ["Emergency", "Cardiology", "Surgery", "ICU"] {
        manager.add_node(name, "Department").unwrap();
    }
    manager.add_edge(1, 2, 5).unwrap();
    manager.add_edge(1, 3, 3).unwrap();
    manager.add_edge(3, 4, 4).unwrap();

    let route = manager.shortest_path(1, 4).unwrap().unwrap();
    assert_eq!(route.ids, vec![1, 3, 4]);
    assert_eq!(route.distance, 7);

    manager.close().unwrap();
    let text = std::fs::read_to_string(dir.path().join(DEFAULT_DATA_FILE)).unwrap();
    assert_eq!(
        text,
        "1 |Emergency|Department|\n2 |Cardiology|Department|\n3 |Surgery|Department|\n\
         4 |ICU|Department|\nEDGES:\n1 2 5\n1 3 3\n3 4 4\n"
    );
}

#[test]
fn test_round_trip_random_graphs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let graph = random_graph(&mut rng, 12, 25);
        let (decoded, stats) = decode(&encode(&graph));

        assert_eq!(stats.skipped, 0);
        assert_eq!(node_set(&decoded), node_set(&graph));
        assert_eq!(edge_set(&decoded), edge_set(&graph));
        assert!(decoded.check_symmetry().is_none());
    }
}

#[test]
fn test_round_trip_ignores_insertion_order() {
    let corridors = [(1, 2, 5), (2, 3, 1), (4, 1, 7), (3, 4, 2), (2, 4, 9)];

    let mut forward = HospitalGraph::new();
    let mut backward = HospitalGraph::new();
    for graph in [&mut forward, &mut backward] {
        for name in ["A", "B", "C", "D"] {
            graph.add_node(name, "Ward").unwrap();
        }
    }
    for &(a, b, w) in &corridors {
        forward.add_edge(a, b, w).unwrap();
    }
    for &(a, b, w) in corridors.iter().rev() {
        backward.add_edge(b, a, w).unwrap();
    }

    let (f, _) = decode(&encode(&forward));
    let (b, _) = decode(&encode(&backward));
    assert_eq!(edge_set(&f), edge_set(&b));
    assert_eq!(edge_set(&f), edge_set(&forward));
}

#[test]
fn test_symmetry_under_random_mutation() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut graph = random_graph(&mut rng, 10, 0);
    for _ in 0..500 {
        let a = rng.random_range(1..=10);
        let b = rng.random_range(1..=10);
        if rng.random_bool(0.6) {
            graph.add_edge(a, b, rng.random_range(0..20)).unwrap();
        } else {
            graph.remove_edge(a, b).unwrap();
        }
        assert_eq!(graph.check_symmetry(), None);
    }
    for loc in graph.iter() {
        let mut ids: Vec<_> = loc.neighbors().iter().map(|n| n.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), loc.neighbors().len());
    }
}

#[test]
fn test_least_weight_is_minimal() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10 {
        let graph = random_graph(&mut rng, 10, 18);
        for to in 2..=10 {
            let hops = graph.shortest_path(1, to, PathStrategy::FewestHops).unwrap();
            let weighted = graph.shortest_path(1, to, PathStrategy::LeastWeight).unwrap();
            match (hops, weighted) {
                (Some(h), Some(w)) => {
                    assert!(w.distance <= h.distance);
                    let summed: u64 = w
                        .ids
                        .windows(2)
                        .map(|pair| u64::from(graph.find_node(pair[0]).unwrap().weight_to(pair[1]).unwrap()))
                        .sum();
                    assert_eq!(summed, w.distance);
                }
                (None, None) => {}
                other => panic!("strategies disagree on reachability: {other:?}"),
            }
        }
    }
}

#[test]
fn test_two_cluster_components() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_empty(dir.path());
    for name in ["A", "B", "C", "D"] {
        manager.add_node(name, "Ward").unwrap();
    }
    manager.add_edge(1, 2, 1).unwrap();
    manager.add_edge(3, 4, 1).unwrap();

    let components = manager.connected_components();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].ids, vec![1, 2]);
    assert_eq!(components[1].ids, vec![3, 4]);

    assert_eq!(manager.shortest_path(1, 4).unwrap(), None);
    assert!(matches!(manager.shortest_path(3, 3), Err(Error::SameEndpoints(3))));
}

#[test]
fn test_loads_file_written_by_previous_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DATA_FILE);
    std::fs::write(
        &path,
        "1 |Emergency|Department|\n2 |Cardiology|Department|\n3 |Ward A|Ward|\n\
         EDGES:\n1 2 5\n2 3 2\n",
    )
    .unwrap();

    let mut manager = GraphManager::open(ManagerConfig {
        data_file: path.clone(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(manager.graph().len(), 3);
    assert_eq!(manager.graph().find_node_by_name("Ward A").unwrap().id(), 3);

    let id = manager.add_node("Lab", "Department").unwrap();
    assert_eq!(id, 4);
    manager.close().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("4 |Lab|Department|\nEDGES:\n"));
}

#[test]
fn test_duplicate_name_keeps_count() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_empty(dir.path());
    manager.add_node("Pharmacy", "Department").unwrap();
    assert!(manager.add_node("Pharmacy", "Ward").is_err());
    assert_eq!(manager.graph().len(), 1);
    assert_eq!(manager.graph().last_id(), 1);
}
