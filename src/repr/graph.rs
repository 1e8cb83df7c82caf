use tracing::{trace, warn};

use super::*;
use crate::testing::test_graph_ops;

/// A weighted graph with a fixed [`Direction`] and [`Representation`].
///
/// Adding an edge inserts missing endpoints. Ids do not need to be contiguous;
/// inserting an id beyond the current capacity doubles the capacity until the id fits.
#[derive(Debug, Clone)]
pub struct Graph {
    direction: Direction,
    registry: VertexRegistry,
    backend: Backend,
    num_edges: NumEdges,
}

impl Graph {
    /// Creates an empty directed graph
    pub fn directed(representation: Representation) -> Self {
        Self::new(Direction::Directed, representation)
    }

    /// Creates an empty undirected graph
    pub fn undirected(representation: Representation) -> Self {
        Self::new(Direction::Undirected, representation)
    }

    pub(crate) fn with_config(config: GraphConfig) -> Result<Self> {
        let capacity = config.get_initial_capacity().max(1);
        let largest = capacity - 1;
        if capacity > MAX_CAPACITY {
            warn!(capacity, "initial capacity exceeds the vertex limit");
            return Err(GraphError::CapacityExceeded { requested: largest });
        }

        let backend = Backend::try_new(config.get_representation(), capacity as usize).map_err(|e| {
            warn!(capacity, error = %e, "cannot allocate graph storage");
            GraphError::CapacityExceeded { requested: largest }
        })?;

        Ok(Self {
            direction: config.get_direction(),
            registry: VertexRegistry::new(capacity as usize),
            backend,
            num_edges: 0,
        })
    }

    /// Returns the present neighbors of `u` (empty if `u` is absent).
    /// See [`AdjacencyList::weighted_neighbors_of`] for the order.
    pub fn neighbors(&self, u: Node) -> Vec<Node> {
        self.neighbors_of(u).collect()
    }

    /// Grows registry and backend such that `u` fits
    fn ensure_capacity(&mut self, u: Node) -> Result<()> {
        if u == INVALID_NODE {
            warn!(vertex = u, "rejected reserved vertex id");
            return Err(GraphError::InvalidVertex(u));
        }

        let Some(capacity) = grown_capacity(self.registry.capacity(), u) else {
            return Ok(());
        };
        if capacity > MAX_CAPACITY as usize {
            warn!(vertex = u, "vertex id exceeds the vertex limit");
            return Err(GraphError::CapacityExceeded { requested: u });
        }

        trace!(
            from = self.registry.capacity(),
            to = capacity,
            representation = %self.representation(),
            "growing graph storage"
        );

        if let Err(e) = self.backend.grow(capacity) {
            warn!(vertex = u, capacity, error = %e, "cannot grow graph storage");
            return Err(GraphError::CapacityExceeded { requested: u });
        }
        self.registry.grow(capacity);
        Ok(())
    }
}

impl GraphNew for Graph {
    fn new(direction: Direction, representation: Representation) -> Self {
        let capacity = DEFAULT_INITIAL_CAPACITY as usize;
        Self {
            direction,
            registry: VertexRegistry::new(capacity),
            backend: Backend::new(representation, capacity),
            num_edges: 0,
        }
    }
}

impl GraphType for Graph {
    fn direction(&self) -> Direction {
        self.direction
    }

    fn representation(&self) -> Representation {
        self.backend.representation()
    }
}

impl GraphNodeOrder for Graph {
    fn number_of_nodes(&self) -> NumNodes {
        self.registry.len()
    }

    fn capacity(&self) -> NumNodes {
        self.registry.capacity() as NumNodes
    }

    fn has_vertex(&self, u: Node) -> bool {
        self.registry.contains(u)
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.registry.iter()
    }
}

impl GraphEdgeOrder for Graph {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl AdjacencyList for Graph {
    type NeighborIter<'a>
        = NeighborIter<'a>
    where
        Self: 'a;

    fn weighted_neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        let present = self.registry.presence();
        if self.has_vertex(u) {
            self.backend.neighbors_of(u, present)
        } else {
            NeighborIter::empty(present)
        }
    }
}

impl AdjacencyTest for Graph {
    fn edge_weight(&self, u: Node, v: Node) -> Option<Weight> {
        if !self.has_vertex(u) || !self.has_vertex(v) {
            return None;
        }
        self.backend.arc_weight(u, v)
    }
}

impl GraphVertexEditing for Graph {
    fn add_vertex(&mut self, u: Node) -> Result<bool> {
        self.ensure_capacity(u)?;
        Ok(self.registry.insert(u))
    }

    fn remove_vertex(&mut self, u: Node) -> bool {
        if !self.registry.remove(u) {
            return false;
        }

        let (outgoing, incoming) = self.backend.detach(u);
        self.num_edges -= match self.direction {
            Direction::Directed => outgoing + incoming,
            Direction::Undirected => outgoing,
        };
        true
    }
}

impl GraphEdgeEditing for Graph {
    fn add_edge(&mut self, u: Node, v: Node, w: Weight) -> Result<bool> {
        if !is_valid_weight(w) {
            warn!(from = u, to = v, weight = w, "rejected edge weight");
            return Err(GraphError::InvalidWeight(w));
        }
        // both ids fit once the larger one does; nothing is inserted before that
        self.ensure_capacity(u.max(v))?;
        self.registry.insert(u);
        self.registry.insert(v);

        let is_new = self.backend.insert_arc(u, v, w);
        if self.is_undirected() && u != v {
            self.backend.insert_arc(v, u, w);
        }
        if is_new {
            self.num_edges += 1;
        }
        Ok(is_new)
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> bool {
        if !self.has_vertex(u) || !self.has_vertex(v) {
            return false;
        }

        let removed = self.backend.remove_arc(u, v);
        if self.is_undirected() && u != v {
            self.backend.remove_arc(v, u);
        }
        if removed {
            self.num_edges -= 1;
        }
        removed
    }
}

test_graph_ops!(directed_list, Direction::Directed, Representation::List);
test_graph_ops!(directed_matrix, Direction::Directed, Representation::Matrix);
test_graph_ops!(undirected_list, Direction::Undirected, Representation::List);
test_graph_ops!(undirected_matrix, Direction::Undirected, Representation::Matrix);
