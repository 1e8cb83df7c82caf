use std::collections::VecDeque;

use tracing::{debug, warn};

use super::*;

/// Iterator implementing topological ordering over a directed graph.
///
/// Uses Kahn's algorithm:
/// - Initializes a FIFO queue with all vertices of in-degree 0 in ascending order.
/// - Repeatedly removes a vertex, decreasing in-degrees of its successors,
///   and enqueues new vertices of in-degree 0.
/// - Stops once all vertices are output or only vertices on (or behind) cycles remain.
pub struct TopoSearch<'a, G> {
    graph: &'a G,
    in_degs: Vec<NumNodes>,
    queue: VecDeque<Node>,
}

impl<'a, G> TopoSearch<'a, G>
where
    G: AdjacencyList,
{
    /// Counts in-degrees of all present vertices and seeds the queue
    pub fn new(graph: &'a G) -> Self {
        let mut in_degs: Vec<NumNodes> = vec![0; graph.capacity() as usize];
        for u in graph.vertices() {
            for v in graph.neighbors_of(u) {
                in_degs[v as usize] += 1;
            }
        }

        let queue = graph
            .vertices()
            .filter(|&u| in_degs[u as usize] == 0)
            .collect();

        Self {
            graph,
            in_degs,
            queue,
        }
    }
}

impl<G> Iterator for TopoSearch<'_, G>
where
    G: AdjacencyList,
{
    type Item = Node;

    /// Each returned vertex is guaranteed to appear after all its predecessors.
    /// On a cyclic graph, iteration terminates early without covering all vertices.
    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.neighbors_of(u) {
            self.in_degs[v as usize] -= 1;
            if self.in_degs[v as usize] == 0 {
                self.queue.push_back(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.graph.len()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

pub trait Acyclicity: AdjacencyList + GraphType + Sized {
    /// Returns an iterator over a (possibly partial) topological order.
    /// See [`TopoSearch`].
    fn topo_search(&self) -> TopoSearch<'_, Self> {
        TopoSearch::new(self)
    }

    /// Returns all vertices of a directed acyclic graph in topological order.
    /// Among vertices that are ready at the same time, those that became ready first
    /// come first; initially ready vertices are taken in ascending order.
    ///
    /// Fails with [`GraphError::RequiresDirected`] on undirected graphs and with
    /// [`GraphError::CycleDetected`] if the graph contains a cycle.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(
    ///     Direction::Directed,
    ///     Representation::List,
    ///     [(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
    /// ).unwrap();
    /// assert_eq!(g.topological_sort().unwrap(), vec![0, 1, 2, 3]);
    /// ```
    fn topological_sort(&self) -> Result<Vec<Node>> {
        if self.is_undirected() {
            warn!("topological sort requires a directed graph");
            return Err(GraphError::RequiresDirected);
        }

        let order: Vec<Node> = self.topo_search().collect();
        if order.len() != self.len() {
            debug!(sorted = order.len(), n = self.len(), "cycle detected");
            return Err(GraphError::CycleDetected);
        }
        Ok(order)
    }

    /// Returns *true* if the graph contains a cycle.
    ///
    /// In a directed graph this is a directed cycle (a self-loop included). In an
    /// undirected graph this is any closed walk that does not immediately return along
    /// the edge it came from; self-loops count as cycles, a single edge does not.
    fn has_cycle(&self) -> bool {
        let found = if self.is_directed() {
            has_directed_cycle(self)
        } else {
            has_undirected_cycle(self)
        };
        debug!(found, "cycle search");
        found
    }

    /// Returns *true* if the graph contains no cycle
    fn is_acyclic(&self) -> bool {
        !self.has_cycle()
    }
}

impl<G: AdjacencyList + GraphType> Acyclicity for G {}

/// Three-colour DFS: a cycle exists iff some edge points to a gray (active) vertex
fn has_directed_cycle<G: AdjacencyList>(graph: &G) -> bool {
    let mut color = vec![Color::White; graph.capacity() as usize];
    let mut stack = Vec::new();

    for root in graph.vertices() {
        if color[root as usize] != Color::White {
            continue;
        }

        color[root as usize] = Color::Gray;
        stack.push((root, graph.neighbors_of(root)));

        while let Some((u, neighbors)) = stack.last_mut() {
            let u = *u;
            match neighbors.next() {
                Some(v) => match color[v as usize] {
                    Color::Gray => return true,
                    Color::White => {
                        color[v as usize] = Color::Gray;
                        stack.push((v, graph.neighbors_of(v)));
                    }
                    Color::Black => {}
                },
                None => {
                    color[u as usize] = Color::Black;
                    stack.pop();
                }
            }
        }
    }

    false
}

/// DFS that remembers the parent of each vertex: reaching a visited vertex other than
/// the parent closes a cycle
fn has_undirected_cycle<G: AdjacencyList>(graph: &G) -> bool {
    let mut visited = graph.vertex_bitset_unset();
    let mut stack = Vec::new();

    for root in graph.vertices() {
        if visited.put(root as usize) {
            continue;
        }
        stack.push((root, INVALID_NODE, graph.neighbors_of(root)));

        while let Some((u, parent, neighbors)) = stack.last_mut() {
            let (u, parent) = (*u, *parent);
            match neighbors.next() {
                Some(v) if v == parent => {}
                Some(v) => {
                    if visited.put(v as usize) {
                        return true;
                    }
                    stack.push((v, u, graph.neighbors_of(v)));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::*;

    const REPRS: [Representation; 2] = [Representation::List, Representation::Matrix];

    #[test]
    fn dag() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Directed,
                repr,
                [(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
            )
            .unwrap();

            assert_eq!(graph.topological_sort().unwrap(), [0, 1, 2, 3]);
            assert!(!graph.has_cycle());
            assert!(graph.is_acyclic());
        }
    }

    #[test]
    fn kahn_is_fifo() {
        // 3 and 0 are sources; 3 -> 1, 0 -> 2
        let mut graph = Graph::directed(Representation::List);
        graph.add_edges([(3, 1, 1.0), (0, 2, 1.0)]).unwrap();

        assert_eq!(graph.topological_sort().unwrap(), [0, 3, 2, 1]);
    }

    #[test]
    fn three_cycle() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Directed,
                repr,
                [(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)],
            )
            .unwrap();

            assert!(graph.has_cycle());
            assert_eq!(graph.topological_sort(), Err(GraphError::CycleDetected));
            assert_eq!(graph.topo_search().count(), 0);
        }
    }

    #[test]
    fn directed_self_loop() {
        let graph = Graph::from_edges(Direction::Directed, Representation::Matrix, [(0, 1, 1.0), (1, 1, 1.0)]).unwrap();
        assert!(graph.has_cycle());
        assert_eq!(graph.topological_sort(), Err(GraphError::CycleDetected));
        assert_eq!(graph.topo_search().collect_vec(), [0]);
    }

    #[test]
    fn directed_diamond_is_acyclic() {
        // two paths to 3 reach a black vertex, not a gray one
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Directed,
                repr,
                [(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0), (4, 0, 1.0)],
            )
            .unwrap();
            assert!(!graph.has_cycle());
        }
    }

    #[test]
    fn undirected_cycles() {
        for repr in REPRS {
            let mut graph = Graph::undirected(repr);
            graph.add_edges([(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0)]).unwrap();
            assert!(!graph.has_cycle());

            graph.add_edge(2, 0, 1.0).unwrap();
            assert!(graph.has_cycle());

            graph.remove_edge(0, 2);
            graph.add_edge(4, 4, 1.0).unwrap();
            assert!(graph.has_cycle());

            assert_eq!(graph.topological_sort(), Err(GraphError::RequiresDirected));
        }
    }

    #[test]
    fn topo_failure_iff_cycle() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for repr in REPRS {
            for n in [5 as NumNodes, 10, 20] {
                for m_ub in [n / 2, n, 2 * n] {
                    for _ in 0..10 {
                        let edges = random_weighted_edges(rng, n, m_ub, Direction::Directed);
                        let graph = graph_with_edges(Direction::Directed, repr, n, &edges);

                        match graph.topological_sort() {
                            Ok(order) => {
                                assert!(!graph.has_cycle());
                                let mut rank = vec![0; n as usize];
                                for (i, &u) in order.iter().enumerate() {
                                    rank[u as usize] = i;
                                }
                                assert!(graph.edges(false).all(|e| rank[e.from as usize] < rank[e.to as usize]));
                            }
                            Err(e) => {
                                assert_eq!(e, GraphError::CycleDetected);
                                assert!(graph.has_cycle());
                            }
                        }
                    }
                }
            }
        }
    }
}
