use crate::*;

/// Provides the direction and storage backend of a graph
pub trait GraphType {
    /// Returns the direction the graph was created with
    fn direction(&self) -> Direction;

    /// Returns the storage backend the graph was created with
    fn representation(&self) -> Representation;

    /// Returns *true* if the graph is directed
    fn is_directed(&self) -> bool {
        self.direction() == Direction::Directed
    }

    /// Returns *true* if the graph is undirected
    fn is_undirected(&self) -> bool {
        !self.is_directed()
    }
}

/// Provides getters pertaining to the vertex set of a graph
pub trait GraphNodeOrder {
    /// Returns the number of present vertices
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns the number of vertex slots, i.e. one more than the largest id that can be
    /// stored without growing. Every present id is smaller than the capacity.
    fn capacity(&self) -> NumNodes;

    /// Returns *true* if `u` is present. Never panics.
    fn has_vertex(&self, u: Node) -> bool;

    /// Returns an iterator over all present vertices in ascending order
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Return the number of present vertices as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }

    /// Returns the smallest present vertex
    fn first_vertex(&self) -> Option<Node> {
        self.vertices().next()
    }

    /// Returns an empty bitset with one entry per vertex slot
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        node_bitset(self.capacity() as usize)
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// An undirected edge `{u, v}` is counted once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    type NeighborIter<'a>: Iterator<Item = (Node, Weight)> + Clone + 'a
    where
        Self: 'a;

    /// Returns an iterator over `(neighbor, weight)` of all outgoing edges of `u` whose
    /// target is present. Yields nothing if `u` is absent.
    ///
    /// For the list backend the order is insertion order; for the matrix backend it is
    /// ascending by neighbor id.
    fn weighted_neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns an iterator over the (open) neighborhood of a given vertex
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.weighted_neighbors_of(u).map(|(v, _)| v)
    }

    /// Returns the number of (outgoing) neighbors of `u`; `0` if `u` is absent
    fn degree_of(&self, u: Node) -> NumNodes {
        self.weighted_neighbors_of(u).count() as NumNodes
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.vertices().map(|u| self.degree_of(u)).max().unwrap_or(0)
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.weighted_neighbors_of(u)
            .map(move |(v, w)| WeightedEdge::new(u, v, w))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph, grouped by source vertex in
    /// ascending order. If `only_normalized`, then only edges `(u, v)` with `u <= v`
    /// are considered: for undirected graphs this yields every edge exactly once.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns the weight of the edge `(u, v)` or `None` if the edge or one of its
    /// endpoints is absent. Never panics.
    fn edge_weight(&self, u: Node, v: Node) -> Option<Weight>;

    /// Returns *true* if the egde (u,v) exists in the graph.
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_weight(u, v).is_some()
    }

    /// Returns *true* if a self-loop (u,u) exists.
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Provides functions to insert/delete vertices
pub trait GraphVertexEditing {
    /// Inserts `u`, growing the storage if required.
    /// Returns *true* exactly if `u` was not present previously.
    fn add_vertex(&mut self, u: Node) -> Result<bool>;

    /// Inserts all vertices in the collection
    fn add_vertices(&mut self, vertices: impl IntoIterator<Item = Node>) -> Result<()> {
        for u in vertices {
            self.add_vertex(u)?;
        }
        Ok(())
    }

    /// Removes `u` and every edge incident to it.
    /// Returns *true* exactly if `u` was present.
    fn remove_vertex(&mut self, u: Node) -> bool;
}

/// Provides functions to insert/delete edges
pub trait GraphEdgeEditing {
    /// Adds the edge `(u, v)` with weight `w`; undirected graphs also store `(v, u)`.
    /// Missing endpoints are inserted first. If the edge already exists, only its weight
    /// is replaced. Returns *true* exactly if the edge was not present previously.
    ///
    /// Fails without modifying the graph if `w` is not a storable weight.
    fn add_edge(&mut self, u: Node, v: Node, w: Weight) -> Result<bool>;

    /// Adds all edges in the collection
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<WeightedEdge>>) -> Result<()> {
        for e in edges {
            let WeightedEdge { from, to, weight } = e.into();
            self.add_edge(from, to, weight)?;
        }
        Ok(())
    }

    /// Removes the edge `(u, v)` (and its mirror in undirected graphs).
    /// Returns *true* exactly if the edge was present.
    fn remove_edge(&mut self, u: Node, v: Node) -> bool;
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with default capacity
    fn new(direction: Direction, representation: Representation) -> Self;
}

/// A super trait for creating a graph from scratch from a set of edges
pub trait GraphFromScratch: Sized {
    fn from_edges(
        direction: Direction,
        representation: Representation,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge>>,
    ) -> Result<Self>;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges(
        direction: Direction,
        representation: Representation,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge>>,
    ) -> Result<Self> {
        let mut graph = Self::new(direction, representation);
        graph.add_edges(edges)?;
        Ok(graph)
    }
}
