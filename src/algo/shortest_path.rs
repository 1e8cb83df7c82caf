/*!
Weighted shortest paths.

- [`ShortestPaths::dijkstra`]: single source, non-negative weights (not validated)
- [`ShortestPaths::bellman_ford`]: single source, arbitrary weights, detects negative cycles
- [`ShortestPaths::floyd_warshall`]: all pairs

Distances are stored densely, indexed by vertex id up to the capacity of the graph.
Unreached vertices (and slots of absent vertices) hold [`NO_EDGE`].
*/

use std::{cmp::Ordering, collections::BinaryHeap, ops::Index};

use tracing::debug;

use super::*;

/// Distances from a single source vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Distances {
    source: Node,
    dist: Vec<Weight>,
}

impl Distances {
    fn new(source: Node, capacity: usize) -> Self {
        let mut dist = vec![NO_EDGE; capacity];
        dist[source as usize] = 0.0;
        Self { source, dist }
    }

    /// The vertex all distances are measured from
    pub fn source(&self) -> Node {
        self.source
    }

    /// Returns the distance to `v`, or `None` if `v` was not reached
    pub fn get(&self, v: Node) -> Option<Weight> {
        self.dist
            .get(v as usize)
            .copied()
            .filter(|&d| d != NO_EDGE)
    }

    /// Returns *true* if `v` was reached from the source
    pub fn is_reachable(&self, v: Node) -> bool {
        self.get(v).is_some()
    }

    /// Iterator over all reached vertices and their distance in ascending id order
    pub fn reachable(&self) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter(|(_, d)| **d != NO_EDGE)
            .map(|(v, &d)| (v as Node, d))
    }

    /// Number of slots, i.e. the capacity of the graph at the time of computation
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    pub fn as_slice(&self) -> &[Weight] {
        &self.dist
    }

    pub fn into_vec(self) -> Vec<Weight> {
        self.dist
    }
}

impl Index<Node> for Distances {
    type Output = Weight;

    /// ** Panics if `v` is not smaller than [`Distances::len`] **
    fn index(&self, v: Node) -> &Self::Output {
        &self.dist[v as usize]
    }
}

/// All-pairs distances as a dense row-major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    dist: Vec<Weight>,
}

impl DistanceMatrix {
    fn new(n: usize) -> Self {
        Self {
            n,
            dist: vec![NO_EDGE; n * n],
        }
    }

    #[inline]
    fn cell(&self, u: usize, v: usize) -> Weight {
        self.dist[u * self.n + v]
    }

    /// Returns the distance from `u` to `v`, or `None` if there is no path or one of
    /// the vertices lies beyond the matrix
    pub fn get(&self, u: Node, v: Node) -> Option<Weight> {
        let (u, v) = (u as usize, v as usize);
        if u >= self.n || v >= self.n {
            return None;
        }
        Some(self.cell(u, v)).filter(|&d| d != NO_EDGE)
    }

    /// Row of distances from `u`
    /// ** Panics if `u` lies beyond the matrix **
    pub fn row(&self, u: Node) -> &[Weight] {
        let start = u as usize * self.n;
        &self.dist[start..start + self.n]
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.n
    }
}

impl Index<(Node, Node)> for DistanceMatrix {
    type Output = Weight;

    /// ** Panics if `u` or `v` is not smaller than [`DistanceMatrix::dim`] **
    fn index(&self, (u, v): (Node, Node)) -> &Self::Output {
        let (u, v) = (u as usize, v as usize);
        assert!(u < self.n && v < self.n, "({u}, {v}) out of bounds for dimension {}", self.n);
        &self.dist[u * self.n + v]
    }
}

/// Heap entry of Dijkstra's algorithm. The order is inverted so that the
/// `BinaryHeap` (a max-heap) pops the smallest distance first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    dist: Weight,
    node: Node,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

pub trait ShortestPaths: AdjacencyList {
    /// Computes the distances from `start` with Dijkstra's algorithm.
    ///
    /// Weights are expected to be non-negative. This is not checked; with negative
    /// weights the result is unspecified.
    /// Fails with [`GraphError::InvalidVertex`] if `start` is absent.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(
    ///     Direction::Directed,
    ///     Representation::Matrix,
    ///     [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 4.0), (2, 3, 1.0)],
    /// ).unwrap();
    ///
    /// let dist = g.dijkstra(0).unwrap();
    /// assert_eq!(dist.get(2), Some(3.0));
    /// assert_eq!(dist.get(3), Some(4.0));
    /// ```
    fn dijkstra(&self, start: Node) -> Result<Distances> {
        if !self.has_vertex(start) {
            return Err(GraphError::InvalidVertex(start));
        }
        debug!(start, "dijkstra");

        let mut dist = Distances::new(start, self.capacity() as usize);
        let mut heap = BinaryHeap::new();
        heap.push(Candidate {
            dist: 0.0,
            node: start,
        });

        while let Some(Candidate { dist: d, node: u }) = heap.pop() {
            if d > dist[u] {
                continue;
            }

            for (v, w) in self.weighted_neighbors_of(u) {
                let candidate = d + w;
                if candidate < dist[v] {
                    dist.dist[v as usize] = candidate;
                    heap.push(Candidate {
                        dist: candidate,
                        node: v,
                    });
                }
            }
        }

        Ok(dist)
    }

    /// Computes the distances from `start` with the Bellman-Ford algorithm.
    ///
    /// Fails with [`GraphError::InvalidVertex`] if `start` is absent and with
    /// [`GraphError::NegativeCycle`] if a cycle of negative total weight is reachable
    /// from `start`. Note that in an undirected graph every negative edge forms such a
    /// cycle with its mirror.
    fn bellman_ford(&self, start: Node) -> Result<Distances> {
        if !self.has_vertex(start) {
            return Err(GraphError::InvalidVertex(start));
        }
        debug!(start, "bellman-ford");

        let mut dist = Distances::new(start, self.capacity() as usize);

        for _ in 1..self.number_of_nodes() {
            let mut changed = false;
            for u in self.vertices() {
                let du = dist[u];
                if du == NO_EDGE {
                    continue;
                }
                for (v, w) in self.weighted_neighbors_of(u) {
                    if du + w < dist[v] {
                        dist.dist[v as usize] = du + w;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        let relaxable = self.vertices().any(|u| {
            let du = dist[u];
            du != NO_EDGE && self.weighted_neighbors_of(u).any(|(v, w)| du + w < dist[v])
        });
        if relaxable {
            debug!(start, "negative cycle reachable");
            return Err(GraphError::NegativeCycle);
        }

        Ok(dist)
    }

    /// Computes the distances between all pairs of present vertices with the
    /// Floyd-Warshall algorithm. The diagonal of present vertices is `0`.
    ///
    /// Negative cycles are not detected; they show up as negative diagonal entries.
    fn floyd_warshall(&self) -> DistanceMatrix {
        debug!(n = self.number_of_nodes(), "floyd-warshall");

        let n = self.capacity() as usize;
        let mut matrix = DistanceMatrix::new(n);
        let dist = &mut matrix.dist;

        for u in self.vertices() {
            let u = u as usize;
            dist[u * n + u] = 0.0;
        }
        for u in self.vertices() {
            for (v, w) in self.weighted_neighbors_of(u) {
                let cell = &mut dist[u as usize * n + v as usize];
                if w < *cell {
                    *cell = w;
                }
            }
        }

        let present = self.vertices().map(|u| u as usize).collect::<Vec<_>>();
        for &k in &present {
            for &i in &present {
                let ik = dist[i * n + k];
                if ik == NO_EDGE {
                    continue;
                }
                for &j in &present {
                    let kj = dist[k * n + j];
                    if kj == NO_EDGE {
                        continue;
                    }
                    if ik + kj < dist[i * n + j] {
                        dist[i * n + j] = ik + kj;
                    }
                }
            }
        }

        matrix
    }
}

impl<G: AdjacencyList> ShortestPaths for G {}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::*;

    const REPRS: [Representation; 2] = [Representation::List, Representation::Matrix];

    /// `0->1 (1), 0->2 (4), 1->2 (2), 1->3 (5), 2->3 (1)`
    fn scenario_a(repr: Representation) -> Graph {
        Graph::from_edges(
            Direction::Directed,
            repr,
            [(0, 1, 1.0), (0, 2, 4.0), (1, 2, 2.0), (1, 3, 5.0), (2, 3, 1.0)],
        )
        .unwrap()
    }

    #[test]
    fn dijkstra_scenario_a() {
        for repr in REPRS {
            let graph = scenario_a(repr);
            let dist = graph.dijkstra(0).unwrap();

            assert_eq!(dist.source(), 0);
            assert_eq!(dist.len(), graph.capacity() as usize);
            assert_eq!(&dist.as_slice()[..4], &[0.0, 1.0, 3.0, 4.0]);
            assert_eq!(dist.reachable().count(), 4);

            let dist = graph.dijkstra(2).unwrap();
            assert_eq!(dist.get(0), None);
            assert_eq!(dist[0], NO_EDGE);
            assert_eq!(dist.get(3), Some(1.0));
            assert!(!dist.is_reachable(1));
        }
    }

    #[test]
    fn bellman_ford_scenario_a() {
        for repr in REPRS {
            let graph = scenario_a(repr);
            assert_eq!(graph.bellman_ford(0).unwrap(), graph.dijkstra(0).unwrap());
        }
    }

    #[test]
    fn floyd_warshall_scenario_a() {
        for repr in REPRS {
            let graph = scenario_a(repr);
            let matrix = graph.floyd_warshall();

            assert_eq!(matrix.get(0, 3), Some(4.0));
            assert_eq!(matrix[(1, 3)], 3.0);
            assert_eq!(matrix.get(3, 0), None);
            assert_eq!(matrix.get(2, 2), Some(0.0));
            assert_eq!(matrix.get(0, 1000), None);
            assert_eq!(&matrix.row(0)[..4], &[0.0, 1.0, 3.0, 4.0]);
            // slots of absent vertices are never written
            assert_eq!(matrix.get(5, 5), None);
        }
    }

    #[test]
    fn negative_cycle() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Directed,
                repr,
                [(0, 1, 1.0), (1, 2, -1.0), (2, 1, -1.0)],
            )
            .unwrap();
            assert_eq!(graph.bellman_ford(0), Err(GraphError::NegativeCycle));

            // unreachable from 3
            let mut graph = graph;
            graph.add_vertex(3).unwrap();
            let dist = graph.bellman_ford(3).unwrap();
            assert_eq!(dist.reachable().collect_vec(), vec![(3, 0.0)]);
        }
    }

    #[test]
    fn infinite_weights_are_rejected() {
        for repr in REPRS {
            let edges = [(0, 1, f64::NEG_INFINITY), (1, 0, 1.0)];
            assert_eq!(
                Graph::from_edges(Direction::Directed, repr, edges).unwrap_err(),
                GraphError::InvalidWeight(f64::NEG_INFINITY)
            );

            // the most negative finite weight still exposes the cycle
            let graph = Graph::from_edges(Direction::Directed, repr, [(0, 1, f64::MIN), (1, 0, 1.0)]).unwrap();
            assert_eq!(graph.bellman_ford(0), Err(GraphError::NegativeCycle));
        }
    }

    #[test]
    #[should_panic]
    fn matrix_index_checks_columns() {
        let graph = scenario_a(Representation::List);
        let matrix = graph.floyd_warshall();
        let _ = matrix[(0, matrix.dim() as Node)];
    }

    #[test]
    fn negative_edges_without_cycle() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Directed,
                repr,
                [(0, 1, 4.0), (0, 2, 1.0), (2, 1, -2.0), (1, 3, 1.0)],
            )
            .unwrap();

            let dist = graph.bellman_ford(0).unwrap();
            assert_eq!(dist.get(1), Some(-1.0));
            assert_eq!(dist.get(3), Some(0.0));
            assert_eq!(graph.floyd_warshall().get(0, 3), Some(0.0));
        }
    }

    #[test]
    fn undirected_negative_edge_is_a_cycle() {
        let graph = Graph::from_edges(
            Direction::Undirected,
            Representation::List,
            [(0, 1, 2.0), (1, 2, -1.0)],
        )
        .unwrap();
        assert_eq!(graph.bellman_ford(0), Err(GraphError::NegativeCycle));
    }

    #[test]
    fn absent_start() {
        for repr in REPRS {
            let graph = scenario_a(repr);
            assert_eq!(graph.dijkstra(9), Err(GraphError::InvalidVertex(9)));
            assert_eq!(graph.bellman_ford(INVALID_NODE), Err(GraphError::InvalidVertex(INVALID_NODE)));
        }
    }

    #[test]
    fn sparse_ids() {
        let mut graph = Graph::directed(Representation::Matrix);
        graph.add_edge(100, 40, 2.5).unwrap();
        graph.add_edge(40, 7, 0.5).unwrap();

        let dist = graph.dijkstra(100).unwrap();
        assert_eq!(dist.reachable().collect_vec(), vec![(7, 3.0), (40, 2.5), (100, 0.0)]);
        assert_eq!(graph.floyd_warshall().get(100, 7), Some(3.0));
    }

    #[test]
    fn algorithms_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for direction in [Direction::Directed, Direction::Undirected] {
            for repr in REPRS {
                for n in [10 as NumNodes, 25, 40] {
                    let edges = random_weighted_edges(rng, n, 3 * n, direction);
                    let mut graph = graph_with_edges(direction, repr, n, &edges);
                    for _ in 0..n / 5 {
                        graph.remove_vertex(rng.random_range(0..n));
                    }

                    let all_pairs = graph.floyd_warshall();
                    for s in graph.vertices() {
                        let dijkstra = graph.dijkstra(s).unwrap();
                        let bellman_ford = graph.bellman_ford(s).unwrap();
                        assert_eq!(dijkstra, bellman_ford);

                        for t in graph.vertices() {
                            assert_eq!(all_pairs.get(s, t), dijkstra.get(t));
                        }
                    }
                }
            }
        }
    }
}
