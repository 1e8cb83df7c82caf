/*!
Minimum spanning trees of undirected graphs.

Both algorithms return the accepted edges in the order they were accepted. On a
disconnected graph, [`SpanningTree::mst_prim`] only spans the component of its start
vertex while [`SpanningTree::mst_kruskal`] returns a spanning forest; in both cases the
result simply has fewer than `|V| - 1` edges.
*/

use std::{cmp::Ordering, collections::BinaryHeap};

use tracing::{debug, warn};

use super::*;

/// Candidate edge of Prim's algorithm; ordered such that the `BinaryHeap` pops the
/// lightest edge first.
#[derive(Debug, Clone, Copy)]
struct LightestFirst(WeightedEdge);

impl Ord for LightestFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .weight
            .total_cmp(&self.0.weight)
            .then_with(|| other.0.endpoints().cmp(&self.0.endpoints()))
    }
}

impl PartialOrd for LightestFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LightestFirst {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LightestFirst {}

pub trait SpanningTree: AdjacencyList + GraphType {
    /// Computes a minimum spanning tree with Prim's algorithm, growing the tree from
    /// `start`. If `start` is absent, the smallest present vertex is used instead.
    /// Every returned edge points away from the tree, i.e. `from` was reached first.
    ///
    /// Fails with [`GraphError::RequiresUndirected`] on directed graphs.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(
    ///     Direction::Undirected,
    ///     Representation::List,
    ///     [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)],
    /// ).unwrap();
    ///
    /// let tree = g.mst_prim(0).unwrap();
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(total_weight(&tree), 3.0);
    /// ```
    fn mst_prim(&self, start: Node) -> Result<Vec<WeightedEdge>> {
        if self.is_directed() {
            warn!("prim requires an undirected graph");
            return Err(GraphError::RequiresUndirected);
        }

        let start = if self.has_vertex(start) {
            start
        } else {
            match self.first_vertex() {
                Some(u) => u,
                None => return Ok(Vec::new()),
            }
        };
        debug!(start, "prim");

        let n = self.len();
        let mut tree = Vec::with_capacity(n.saturating_sub(1));
        let mut in_tree = self.vertex_bitset_unset();
        let mut heap = BinaryHeap::new();

        let grow = |u: Node, in_tree: &mut NodeBitSet, heap: &mut BinaryHeap<LightestFirst>| {
            in_tree.insert(u as usize);
            heap.extend(
                self.weighted_neighbors_of(u)
                    .filter(|&(v, _)| !in_tree.contains(v as usize))
                    .map(|(v, w)| LightestFirst(WeightedEdge::new(u, v, w))),
            );
        };
        grow(start, &mut in_tree, &mut heap);

        while tree.len() + 1 < n {
            let Some(LightestFirst(edge)) = heap.pop() else {
                break;
            };
            if in_tree.contains(edge.to as usize) {
                continue;
            }
            tree.push(edge);
            grow(edge.to, &mut in_tree, &mut heap);
        }

        debug!(edges = tree.len(), "prim done");
        Ok(tree)
    }

    /// Computes a minimum spanning forest with Kruskal's algorithm. Every returned edge
    /// satisfies `from < to`; self-loops are ignored.
    ///
    /// Fails with [`GraphError::RequiresUndirected`] on directed graphs.
    fn mst_kruskal(&self) -> Result<Vec<WeightedEdge>> {
        if self.is_directed() {
            warn!("kruskal requires an undirected graph");
            return Err(GraphError::RequiresUndirected);
        }
        debug!(n = self.number_of_nodes(), "kruskal");

        let mut edges: Vec<WeightedEdge> = self.edges(true).filter(|e| !e.is_loop()).collect();
        edges.sort_unstable_by(|a, b| a.weight.total_cmp(&b.weight));

        let n = self.len();
        let mut tree = Vec::with_capacity(n.saturating_sub(1));
        let mut sets = UnionFind::new(self.capacity());

        for edge in edges {
            if tree.len() + 1 >= n {
                break;
            }
            if sets.union(edge.from, edge.to) {
                tree.push(edge);
            }
        }

        debug!(edges = tree.len(), "kruskal done");
        Ok(tree)
    }
}

impl<G: AdjacencyList + GraphType> SpanningTree for G {}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::*;

    const REPRS: [Representation; 2] = [Representation::List, Representation::Matrix];

    #[test]
    fn triangle() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Undirected,
                repr,
                [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)],
            )
            .unwrap();

            let prim = graph.mst_prim(0).unwrap();
            assert_eq!(prim, vec![WeightedEdge::new(0, 1, 1.0), WeightedEdge::new(1, 2, 2.0)]);

            let kruskal = graph.mst_kruskal().unwrap();
            assert_eq!(kruskal, vec![WeightedEdge::new(0, 1, 1.0), WeightedEdge::new(1, 2, 2.0)]);
        }
    }

    #[test]
    fn directed_is_rejected() {
        for repr in REPRS {
            let graph = Graph::from_edges(Direction::Directed, repr, [(0, 1, 1.0)]).unwrap();
            assert_eq!(graph.mst_prim(0), Err(GraphError::RequiresUndirected));
            assert_eq!(graph.mst_kruskal(), Err(GraphError::RequiresUndirected));
        }
    }

    #[test]
    fn prim_falls_back_to_first_vertex() {
        let mut graph = Graph::undirected(Representation::List);
        graph.add_edge(3, 5, 1.0).unwrap();
        graph.add_edge(5, 4, -2.0).unwrap();

        let tree = graph.mst_prim(0).unwrap();
        assert_eq!(tree, vec![WeightedEdge::new(3, 5, 1.0), WeightedEdge::new(5, 4, -2.0)]);
        assert!(Graph::undirected(Representation::Matrix).mst_prim(0).unwrap().is_empty());
    }

    #[test]
    fn disconnected() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Undirected,
                repr,
                [(0, 1, 1.0), (2, 3, 5.0), (3, 4, 1.0), (2, 4, 2.0)],
            )
            .unwrap();

            let prim = graph.mst_prim(0).unwrap();
            assert_eq!(prim, vec![WeightedEdge::new(0, 1, 1.0)]);
            assert_eq!(total_weight(&graph.mst_prim(2).unwrap()), 3.0);

            let kruskal = graph.mst_kruskal().unwrap();
            assert_eq!(kruskal.len(), 3);
            assert_eq!(total_weight(&kruskal), 4.0);
        }
    }

    #[test]
    fn self_loops_are_ignored() {
        for repr in REPRS {
            let graph = Graph::from_edges(
                Direction::Undirected,
                repr,
                [(0, 0, -5.0), (0, 1, 2.0), (1, 1, -1.0)],
            )
            .unwrap();
            assert_eq!(graph.mst_prim(1).unwrap(), vec![WeightedEdge::new(1, 0, 2.0)]);
            assert_eq!(graph.mst_kruskal().unwrap(), vec![WeightedEdge::new(0, 1, 2.0)]);
        }
    }

    #[test]
    fn prim_and_kruskal_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for repr in REPRS {
            for n in [10 as NumNodes, 30, 80] {
                // a path guarantees connectivity
                let mut edges = (1..n).map(|u| WeightedEdge::new(u - 1, u, 10.0)).collect_vec();
                edges.extend(random_weighted_edges(rng, n, 3 * n, Direction::Undirected));
                let graph = graph_with_edges(Direction::Undirected, repr, n, &edges);

                let prim = graph.mst_prim(0).unwrap();
                let kruskal = graph.mst_kruskal().unwrap();

                assert_eq!(prim.len(), n as usize - 1);
                assert_eq!(kruskal.len(), n as usize - 1);
                assert_eq!(total_weight(&prim), total_weight(&kruskal));

                let mut sets = UnionFind::new(n);
                assert!(prim.iter().all(|e| sets.union(e.from, e.to)));
            }
        }
    }
}
