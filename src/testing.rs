#[cfg(test)]
use std::collections::BTreeMap;

#[cfg(test)]
use rand::Rng;

#[cfg(test)]
use crate::{ops::*, *};

/// Creates a list of at most `m_ub` random edges with integral weights in `1..=9` for
/// nodes `0..n`. Endpoints of undirected edges are normalized; duplicates may occur.
#[cfg(test)]
pub(crate) fn random_weighted_edges<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    m_ub: NumEdges,
    direction: Direction,
) -> Vec<WeightedEdge> {
    (0..m_ub)
        .map(|_| {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            let w = rng.random_range(1..10) as Weight;

            let e = WeightedEdge::new(u, v, w);
            if direction == Direction::Undirected {
                e.normalized()
            } else {
                e
            }
        })
        .collect()
}

/// Builds a graph on vertices `0..n` with the given edges
#[cfg(test)]
pub(crate) fn graph_with_edges<'a>(
    direction: Direction,
    representation: Representation,
    n: NumNodes,
    edges: impl IntoIterator<Item = &'a WeightedEdge>,
) -> Graph {
    let mut graph = graph_with_vertices(direction, representation, n);
    graph.add_edges(edges).unwrap();
    graph
}

/// Builds an edgeless graph on vertices `0..n`
#[cfg(test)]
pub(crate) fn graph_with_vertices(
    direction: Direction,
    representation: Representation,
    n: NumNodes,
) -> Graph {
    let mut graph = Graph::new(direction, representation);
    graph.add_vertices(0..n).unwrap();
    graph
}

/// Expected edge set of a graph after inserting `edges` in order: the last weight
/// written for an (undirected: normalized) endpoint pair wins.
#[cfg(test)]
pub(crate) fn edge_model<'a>(
    direction: Direction,
    edges: impl IntoIterator<Item = &'a WeightedEdge>,
) -> BTreeMap<(Node, Node), Weight> {
    edges
        .into_iter()
        .map(|e| {
            let e = if direction == Direction::Undirected {
                e.normalized()
            } else {
                *e
            };
            (e.endpoints(), e.weight)
        })
        .collect()
}

/// Runs the same test-suite for every combination of direction and representation
macro_rules! test_graph_ops {
    ($env:ident, $direction:expr, $representation:expr) => {
        #[cfg(test)]
        mod $env {
            use crate::{algo::Traversal, error::*, ops::*, testing::*, *};
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            const DIRECTION: Direction = $direction;
            const REPRESENTATION: Representation = $representation;

            fn is_undirected() -> bool {
                DIRECTION == Direction::Undirected
            }

            #[test]
            fn graph_new() {
                let graph = Graph::new(DIRECTION, REPRESENTATION);

                assert_eq!(graph.direction(), DIRECTION);
                assert_eq!(graph.representation(), REPRESENTATION);
                assert_eq!(graph.number_of_nodes(), 0);
                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.capacity(), config::DEFAULT_INITIAL_CAPACITY);
                assert!(graph.is_empty());
                assert!(graph.vertices().next().is_none());
                assert!(graph.neighbors(0).is_empty());
            }

            #[test]
            fn vertex_editing() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);
                let mut graph = Graph::new(DIRECTION, REPRESENTATION);
                let mut expected = std::collections::BTreeSet::new();

                for _ in 0..200 {
                    let u = rng.random_range(0..300);
                    assert_eq!(graph.add_vertex(u).unwrap(), expected.insert(u));
                    assert!(u < graph.capacity());
                }
                let largest = *expected.last().unwrap();
                assert_eq!(graph.capacity(), (largest + 1).next_power_of_two());
                assert_eq!(graph.number_of_nodes() as usize, expected.len());
                assert_eq!(graph.vertices().collect_vec(), expected.iter().copied().collect_vec());

                for _ in 0..200 {
                    let u = rng.random_range(0..600);
                    assert_eq!(graph.remove_vertex(u), expected.remove(&u));
                }
                assert_eq!(graph.vertices().collect_vec(), expected.iter().copied().collect_vec());
                assert!(!graph.has_vertex(100_000));
                assert!(!graph.remove_vertex(INVALID_NODE));
                assert_eq!(graph.add_vertex(INVALID_NODE), Err(GraphError::InvalidVertex(INVALID_NODE)));
            }

            #[test]
            fn adjacency_list() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [10 as NumNodes, 20, 50] {
                    for m_ub in [n * 2, n * 5, n * 10] {
                        for _ in 0..5 {
                            let edges = random_weighted_edges(rng, n, m_ub, DIRECTION);
                            let graph = graph_with_edges(DIRECTION, REPRESENTATION, n, &edges);
                            let model = edge_model(DIRECTION, &edges);

                            assert_eq!(graph.number_of_nodes(), n);
                            assert_eq!(graph.number_of_edges() as usize, model.len());

                            let mut stored = graph
                                .edges(is_undirected())
                                .map(|e| (e.endpoints(), e.weight))
                                .collect_vec();
                            stored.sort_by_key(|(uv, _)| *uv);
                            assert_eq!(stored, model.iter().map(|(uv, w)| (*uv, *w)).collect_vec());

                            for (&(u, v), &w) in &model {
                                assert_eq!(graph.edge_weight(u, v), Some(w));
                                if is_undirected() {
                                    assert_eq!(graph.edge_weight(v, u), Some(w));
                                }
                            }

                            for u in 0..n {
                                let mut expected = model
                                    .keys()
                                    .filter_map(|&(a, b)| {
                                        if a == u {
                                            Some(b)
                                        } else if is_undirected() && b == u {
                                            Some(a)
                                        } else {
                                            None
                                        }
                                    })
                                    .collect_vec();
                                expected.sort_unstable();

                                let mut neighbors = graph.neighbors(u);
                                assert_eq!(graph.degree_of(u) as usize, neighbors.len());
                                neighbors.sort_unstable();
                                assert_eq!(neighbors, expected);
                            }
                        }
                    }
                }
            }

            #[test]
            fn edge_editing() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [10 as NumNodes, 20, 50] {
                    for m_ub in [n * 2, n * 5] {
                        let edges = random_weighted_edges(rng, n, m_ub, DIRECTION);
                        let mut graph = graph_with_edges(DIRECTION, REPRESENTATION, n, &edges);
                        let mut model = edge_model(DIRECTION, &edges);

                        for _ in 0..m_ub {
                            let u = rng.random_range(0..n);
                            let v = rng.random_range(0..n);
                            let key = if is_undirected() { (u.min(v), u.max(v)) } else { (u, v) };

                            assert_eq!(graph.remove_edge(u, v), model.remove(&key).is_some());
                            assert!(!graph.has_edge(u, v));
                            if is_undirected() {
                                assert!(!graph.has_edge(v, u));
                            }
                            assert_eq!(graph.number_of_edges() as usize, model.len());
                        }
                    }
                }
            }

            #[test]
            fn weight_update() {
                let mut graph = graph_with_vertices(DIRECTION, REPRESENTATION, 4);
                assert!(graph.add_edge(0, 1, 3.0).unwrap());
                assert!(!graph.add_edge(0, 1, -2.5).unwrap());

                assert_eq!(graph.edge_weight(0, 1), Some(-2.5));
                assert_eq!(graph.number_of_edges(), 1);
                assert_eq!(graph.degree_of(0), 1);

                if is_undirected() {
                    assert!(!graph.add_edge(1, 0, 4.0).unwrap());
                    assert_eq!(graph.edge_weight(0, 1), Some(4.0));
                    assert_eq!(graph.number_of_edges(), 1);
                } else {
                    assert!(graph.add_edge(1, 0, 4.0).unwrap());
                    assert_eq!(graph.edge_weight(0, 1), Some(-2.5));
                    assert_eq!(graph.number_of_edges(), 2);
                }

                assert!(graph.add_edge(2, 2, 1.0).unwrap());
                assert!(graph.has_self_loop(2));
                assert_eq!(graph.neighbors(2), vec![2]);
            }

            #[test]
            fn rejected_mutations() {
                let mut graph = graph_with_vertices(DIRECTION, REPRESENTATION, 3);

                assert_eq!(graph.add_edge(0, 1, NO_EDGE), Err(GraphError::InvalidWeight(NO_EDGE)));
                assert!(matches!(graph.add_edge(0, 1, f64::NAN), Err(GraphError::InvalidWeight(_))));
                assert!(matches!(graph.add_edge(0, 9, f64::NAN), Err(GraphError::InvalidWeight(_))));
                assert_eq!(
                    graph.add_edge(1, 0, f64::NEG_INFINITY),
                    Err(GraphError::InvalidWeight(f64::NEG_INFINITY))
                );
                assert_eq!(graph.add_edge(0, INVALID_NODE, 1.0), Err(GraphError::InvalidVertex(INVALID_NODE)));
                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), 3);

                assert!(!graph.remove_edge(0, 1));
                assert!(!graph.remove_edge(0, 1000));
                assert_eq!(graph.edge_weight(5, 1000), None);
            }

            #[test]
            fn remove_vertex_drops_incident_edges() {
                let rng = &mut Pcg64Mcg::seed_from_u64(4);

                for n in [10 as NumNodes, 30] {
                    let edges = random_weighted_edges(rng, n, 4 * n, DIRECTION);
                    let mut graph = graph_with_edges(DIRECTION, REPRESENTATION, n, &edges);
                    let mut model = edge_model(DIRECTION, &edges);

                    for u in (0..n).step_by(3) {
                        assert!(graph.remove_vertex(u));
                        model.retain(|&(a, b), _| a != u && b != u);

                        assert!(!graph.has_vertex(u));
                        assert!(graph.neighbors(u).is_empty());
                        assert_eq!(graph.number_of_edges() as usize, model.len());
                        assert!(graph.vertices().all(|v| !graph.neighbors(v).contains(&u)));
                    }

                    // re-inserting a removed vertex yields an isolated vertex
                    assert!(graph.add_vertex(0).unwrap());
                    assert_eq!(graph.degree_of(0), 0);
                    assert!(graph.vertices().all(|v| !graph.has_edge(v, 0)));
                }
            }

            #[test]
            fn rejected_endpoint_inserts_nothing() {
                for (u, v) in [(3, INVALID_NODE), (INVALID_NODE, 3)] {
                    let mut graph = Graph::new(DIRECTION, REPRESENTATION);
                    assert_eq!(graph.add_edge(u, v, 1.0), Err(GraphError::InvalidVertex(INVALID_NODE)));
                    assert!(!graph.has_vertex(3));
                    assert_eq!(graph.number_of_nodes(), 0);
                }

                let mut graph = Graph::new(DIRECTION, REPRESENTATION);
                let huge = Node::MAX - 1;
                assert_eq!(graph.add_edge(3, huge, 1.0), Err(GraphError::CapacityExceeded { requested: huge }));
                assert!(!graph.has_vertex(3));
                assert_eq!(graph.number_of_nodes(), 0);
                assert_eq!(graph.capacity(), config::DEFAULT_INITIAL_CAPACITY);
            }

            #[test]
            fn capacity_exceeded_leaves_graph_unchanged() {
                let mut graph = graph_with_vertices(DIRECTION, REPRESENTATION, 3);
                graph.add_edge(0, 1, 1.0).unwrap();
                let capacity = graph.capacity();

                let mut too_large = vec![Node::MAX - 1, MAX_CAPACITY];
                if REPRESENTATION == Representation::Matrix {
                    // fits the id limit, but `2^62` cells cannot be reserved
                    too_large.push(1 << 30);
                }

                for u in too_large {
                    assert_eq!(graph.add_vertex(u), Err(GraphError::CapacityExceeded { requested: u }));
                    assert_eq!(graph.add_edge(2, u, 1.0), Err(GraphError::CapacityExceeded { requested: u }));

                    assert!(!graph.has_vertex(u));
                    assert_eq!(graph.capacity(), capacity);
                    assert_eq!(graph.number_of_nodes(), 3);
                    assert_eq!(graph.number_of_edges(), 1);
                    assert_eq!(graph.edge_weight(0, 1), Some(1.0));
                    assert_eq!(graph.bfs(0).count(), 2);
                }
            }

            #[test]
            fn add_edge_inserts_endpoints() {
                let mut graph = Graph::new(DIRECTION, REPRESENTATION);
                assert!(graph.add_edge(3, 20, 2.0).unwrap());

                assert!(graph.has_vertex(3));
                assert!(graph.has_vertex(20));
                assert_eq!(graph.number_of_nodes(), 2);
                assert_eq!(graph.capacity(), 32);
                assert_eq!(graph.edge_weight(3, 20), Some(2.0));
                assert_eq!(graph.has_edge(20, 3), is_undirected());
            }

            #[test]
            fn neighbor_order() {
                let mut graph = graph_with_vertices(DIRECTION, REPRESENTATION, 5);
                for v in [3, 1, 4, 2] {
                    graph.add_edge(0, v, 1.0).unwrap();
                }

                let expected = match REPRESENTATION {
                    Representation::List => vec![3, 1, 4, 2],
                    Representation::Matrix => vec![1, 2, 3, 4],
                };
                assert_eq!(graph.neighbors(0), expected);
            }

            #[test]
            fn growth_keeps_edges() {
                let mut graph = graph_with_vertices(DIRECTION, REPRESENTATION, 3);
                graph.add_edge(0, 1, 1.5).unwrap();
                graph.add_edge(2, 0, -1.0).unwrap();

                graph.add_vertex(100).unwrap();
                assert_eq!(graph.capacity(), 128);
                graph.add_edge(100, 2, 2.0).unwrap();

                assert_eq!(graph.edge_weight(0, 1), Some(1.5));
                assert_eq!(graph.edge_weight(2, 0), Some(-1.0));
                assert_eq!(graph.edge_weight(100, 2), Some(2.0));
                assert_eq!(graph.number_of_edges(), 3);
            }
        }
    };
}

pub(crate) use test_graph_ops;
