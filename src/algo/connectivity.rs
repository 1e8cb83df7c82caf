use std::iter::FusedIterator;

use itertools::Itertools;
use tracing::{debug, warn};

use super::*;

pub trait Connectivity: AdjacencyList + GraphType + Sized {
    /// Returns the connected components of an undirected graph. Components are found by
    /// BFS from the smallest vertex not covered yet; every component lists its vertices
    /// in BFS order.
    ///
    /// Fails with [`GraphError::RequiresUndirected`] on directed graphs.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = Graph::undirected(Representation::List);
    /// g.add_edges([(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0)]).unwrap();
    /// g.add_vertex(5).unwrap();
    ///
    /// let ccs = g.connected_components().unwrap();
    /// assert_eq!(ccs, vec![vec![0, 1, 2], vec![3, 4], vec![5]]);
    /// ```
    fn connected_components(&self) -> Result<Vec<Vec<Node>>> {
        if self.is_directed() {
            warn!("connected components require an undirected graph");
            return Err(GraphError::RequiresUndirected);
        }

        let components = ConnectedComponents::new(self).collect_vec();
        debug!(components = components.len(), "connected components");
        Ok(components)
    }

    /// Returns the strongly connected components of a directed graph in reverse
    /// topological order of the condensation. Every vertex belongs to exactly one
    /// component; isolated vertices form components of size one.
    ///
    /// Fails with [`GraphError::RequiresDirected`] on undirected graphs.
    fn strongly_connected_components(&self) -> Result<Vec<Vec<Node>>> {
        if self.is_undirected() {
            warn!("strongly connected components require a directed graph");
            return Err(GraphError::RequiresDirected);
        }

        let components = StronglyConnectedComponents::new(self).collect_vec();
        debug!(components = components.len(), "strongly connected components");
        Ok(components)
    }
}

impl<G> Connectivity for G where G: AdjacencyList + GraphType + Sized {}

/// Iterator over the connected components of a graph, one BFS per component.
/// On directed graphs, this yields the vertices reachable from the smallest uncovered
/// vertex, which is generally not a meaningful decomposition.
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    bfs: BFS<'a, G>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            bfs: BFS::new(graph, graph.first_vertex().unwrap_or(INVALID_NODE)),
        }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cc = self.bfs.by_ref().collect_vec();
            if !cc.is_empty() {
                return Some(cc);
            }

            if !self.bfs.try_restart_at_unvisited() {
                return None;
            }
        }
    }
}

impl<G> FusedIterator for ConnectedComponents<'_, G> where G: AdjacencyList {}

/// Tarjan's algorithm as an iterator emitting one strongly connected component at a
/// time. Components appear in reverse topological order of the condensation; the first
/// vertex of each component is the root of its DFS subtree.
///
/// Searches are started at unvisited vertices in ascending order. The recursion runs on
/// an explicit stack of frames, so deep graphs only cost heap memory.
pub struct StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + 'a,
{
    graph: &'a G,
    next_root: Node,
    counter: Node,

    /// Discovery time of each vertex; `INVALID_NODE` while undiscovered
    index: Vec<Node>,
    low_link: Vec<Node>,
    on_path: NodeBitSet,
    path: Vec<Node>,

    frames: Vec<Frame<'a, G>>,
}

struct Frame<'a, G>
where
    G: AdjacencyList + 'a,
{
    node: Node,
    path_len: usize,
    neighbors: G::NeighborIter<'a>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + 'a,
{
    pub fn new(graph: &'a G) -> Self {
        let capacity = graph.capacity() as usize;
        Self {
            graph,
            next_root: 0,
            counter: 0,
            index: vec![INVALID_NODE; capacity],
            low_link: vec![INVALID_NODE; capacity],
            on_path: graph.vertex_bitset_unset(),
            path: Vec::new(),
            frames: Vec::new(),
        }
    }

    fn is_discovered(&self, u: Node) -> bool {
        self.index[u as usize] != INVALID_NODE
    }

    /// Assigns the next discovery time to `u` and descends into it
    fn discover(&mut self, u: Node) {
        self.index[u as usize] = self.counter;
        self.low_link[u as usize] = self.counter;
        self.counter += 1;

        self.on_path.insert(u as usize);
        self.frames.push(Frame {
            node: u,
            path_len: self.path.len(),
            neighbors: self.graph.weighted_neighbors_of(u),
        });
        self.path.push(u);
    }

    /// Starts a new search at the smallest present vertex not discovered yet
    fn start_next_search(&mut self) -> bool {
        while self.next_root < self.graph.capacity() {
            let u = self.next_root;
            self.next_root += 1;
            if self.graph.has_vertex(u) && !self.is_discovered(u) {
                self.discover(u);
                return true;
            }
        }
        false
    }

    /// Continues the current search until a component is complete.
    /// Returns `None` once the search tree is exhausted.
    fn advance(&mut self) -> Option<Vec<Node>> {
        while let Some(frame) = self.frames.last_mut() {
            let u = frame.node;

            if let Some((v, _)) = frame.neighbors.next() {
                if !self.is_discovered(v) {
                    self.discover(v);
                } else if self.on_path.contains(v as usize) {
                    let low = self.low_link[u as usize].min(self.index[v as usize]);
                    self.low_link[u as usize] = low;
                }
                continue;
            }

            let path_len = frame.path_len;
            self.frames.pop();

            let low = self.low_link[u as usize];
            if let Some(parent) = self.frames.last() {
                let p = parent.node as usize;
                self.low_link[p] = self.low_link[p].min(low);
            }

            if low == self.index[u as usize] {
                let component = self.path.split_off(path_len);
                for &w in &component {
                    self.on_path.set(w as usize, false);
                }
                return Some(component);
            }
        }

        None
    }
}

impl<'a, G> Iterator for StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + 'a,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(component) = self.advance() {
                return Some(component);
            }
            if !self.start_next_search() {
                return None;
            }
        }
    }
}

impl<'a, G> FusedIterator for StronglyConnectedComponents<'a, G> where G: AdjacencyList + 'a {}

/// Sorts the vertices in each component increasingly and then the components themselves
/// by their smallest vertex.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_by(|a, b| a.first().cmp(&b.first()));
    components
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::*;

    const REPRS: [Representation; 2] = [Representation::List, Representation::Matrix];

    #[test]
    fn connected_components() {
        for repr in REPRS {
            let mut graph = Graph::undirected(repr);
            graph.add_vertices(0..6).unwrap();
            graph.add_edges([(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0)]).unwrap();

            let ccs = graph.connected_components().unwrap();
            assert_eq!(ccs.iter().map(|c| c.len()).collect_vec(), [3, 2, 1]);
            assert_eq!(sort_components(ccs), [vec![0, 1, 2], vec![3, 4], vec![5]]);

            assert_eq!(
                Graph::directed(repr).connected_components(),
                Err(GraphError::RequiresUndirected)
            );
            assert!(Graph::undirected(repr).connected_components().unwrap().is_empty());
        }
    }

    #[test]
    fn components_skip_removed_vertices() {
        let mut graph = Graph::undirected(Representation::Matrix);
        graph.add_edges([(2, 4, 1.0), (4, 6, 1.0), (9, 6, 1.0)]).unwrap();
        graph.remove_vertex(6);

        let ccs = sort_components(graph.connected_components().unwrap());
        assert_eq!(ccs, [vec![2, 4], vec![9]]);
    }

    #[test]
    pub fn scc() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Directed,
                repr,
                [
                    (0, 1),
                    (1, 2),
                    (1, 4),
                    (1, 5),
                    (2, 6),
                    (2, 3),
                    (3, 2),
                    (3, 7),
                    (4, 0),
                    (4, 5),
                    (5, 6),
                    (6, 5),
                    (7, 3),
                    (7, 6),
                ]
                .map(|(u, v)| WeightedEdge::new(u, v, 1.0)),
            )
            .unwrap();

            let sccs = graph.strongly_connected_components().unwrap();
            assert_eq!(sccs.len(), 3);
            assert!(sccs.iter().all(|c| !c.is_empty()));

            // reverse topological order: {5, 6} has no outgoing edges
            assert_eq!(sort_components(vec![sccs[0].clone()]), [vec![5, 6]]);

            let sccs = sort_components(sccs);
            assert_eq!(sccs[0], [0, 1, 4]);
            assert_eq!(sccs[1], [2, 3, 7]);
            assert_eq!(sccs[2], [5, 6]);
        }
    }

    #[test]
    fn scc_cycle_with_tail() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3, 3 <-> 4, 5 isolated
        for repr in REPRS {
            let mut graph = Graph::directed(repr);
            graph
                .add_edges([(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 3, 1.0)])
                .unwrap();
            graph.add_vertex(5).unwrap();

            let sccs = graph.strongly_connected_components().unwrap();
            assert_eq!(sccs.len(), 3);
            assert_eq!(sccs[0], [3, 4]);
            assert_eq!(sort_components(sccs), [vec![0, 1, 2], vec![3, 4], vec![5]]);

            assert_eq!(
                Graph::undirected(repr).strongly_connected_components(),
                Err(GraphError::RequiresDirected)
            );
        }
    }

    #[test]
    fn scc_with_absent_ids() {
        // 4 is never added
        for repr in REPRS {
            let mut graph = Graph::directed(repr);
            graph
                .add_edges([(0, 1, 1.0), (1, 2, 1.0), (2, 1, 1.0), (2, 3, 1.0), (3, 2, 1.0)])
                .unwrap();
            graph.add_vertex(5).unwrap();

            let sccs = sort_components(graph.strongly_connected_components().unwrap());
            assert_eq!(sccs, [vec![0], vec![1, 2, 3], vec![5]]);
        }
    }

    #[test]
    pub fn scc_singletons() {
        // {0,1} and {4,5} are scc pairs, 2 has a self-loop, 3 is isolated
        for repr in REPRS {
            let mut graph = Graph::directed(repr);
            graph.add_vertices(0..6).unwrap();
            graph
                .add_edges([(0, 1, 1.0), (1, 0, 1.0), (2, 2, 1.0), (4, 5, 1.0), (5, 4, 1.0)])
                .unwrap();

            let sccs = sort_components(graph.strongly_connected_components().unwrap());
            assert_eq!(sccs, [vec![0, 1], vec![2], vec![3], vec![4, 5]]);
        }
    }

    #[test]
    fn scc_long_cycle() {
        // assert that we can deal with very deep stacks
        let n: Node = 10_000;
        let edges = (0..n).map(|u| WeightedEdge::new(u, (u + 1) % n, 1.0)).collect_vec();
        let graph = graph_with_edges(Direction::Directed, Representation::List, n, &edges);

        let sccs = graph.strongly_connected_components().unwrap();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n as usize);
    }

    #[test]
    fn scc_partition_random() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1234);

        for repr in REPRS {
            for n in [20 as NumNodes, 60] {
                let edges = random_weighted_edges(rng, n, 2 * n, Direction::Directed);
                let graph = graph_with_edges(Direction::Directed, repr, n, &edges);

                let sccs = graph.strongly_connected_components().unwrap();
                assert_eq!(sccs.iter().map(|c| c.len()).sum::<usize>(), n as usize);

                for c in &sccs {
                    for &u in c {
                        for &v in c {
                            assert!(graph.is_reachable(u, v));
                        }
                    }
                }
            }
        }
    }
}
