/*!
# Graph Configuration

The two properties of a graph that are fixed at construction:
- its [`Direction`] (directed or undirected), and
- its [`Representation`] (sparse adjacency lists or a dense adjacency matrix).

Both are chosen once and can never change afterwards. [`GraphConfig`] bundles them
(plus the initial vertex capacity) and builds the graph:

```
use wgraphs::prelude::*;

let graph = GraphConfig::new()
    .undirected()
    .representation(Representation::Matrix)
    .initial_capacity(16)
    .build()
    .unwrap();

assert!(!graph.is_directed());
assert_eq!(graph.capacity(), 16);
```
*/

use std::{fmt::Display, str::FromStr};

use crate::{Graph, NumNodes};

/// Vertex capacity of a freshly created graph
pub const DEFAULT_INITIAL_CAPACITY: NumNodes = 8;

/// Whether edges have an orientation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Directed,
    /// Every edge `{u, v}` is stored as `(u, v)` and `(v, u)`
    Undirected,
}

/// Storage backend for edges
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    /// Per-vertex edge arrays; `O(V + E)` space
    #[default]
    List,
    /// Dense `V x V` weight matrix; `O(V^2)` space, `O(1)` edge lookups
    Matrix,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Directed => write!(f, "directed"),
            Direction::Undirected => write!(f, "undirected"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "directed" | "digraph" => Ok(Direction::Directed),
            "undirected" | "graph" => Ok(Direction::Undirected),
            _ => Err(format!("Unknown Direction: {s}")),
        }
    }
}

impl Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Representation::List => write!(f, "list"),
            Representation::Matrix => write!(f, "matrix"),
        }
    }
}

impl FromStr for Representation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" | "adjlist" => Ok(Representation::List),
            "matrix" | "adjmatrix" => Ok(Representation::Matrix),
            _ => Err(format!("Unknown Representation: {s}")),
        }
    }
}

/// Builder for [`Graph`].
///
/// Every option can either be set in place (`set_*`) or in a chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    direction: Direction,
    representation: Representation,
    initial_capacity: NumNodes,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            representation: Representation::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl GraphConfig {
    /// Creates a configuration for an empty directed adjacency-list graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.set_direction(direction);
        self
    }

    pub fn directed(self) -> Self {
        self.direction(Direction::Directed)
    }

    pub fn undirected(self) -> Self {
        self.direction(Direction::Undirected)
    }

    pub fn set_representation(&mut self, representation: Representation) {
        self.representation = representation;
    }

    pub fn representation(mut self, representation: Representation) -> Self {
        self.set_representation(representation);
        self
    }

    /// Sets the number of vertex slots allocated up front. A value of `0` is
    /// treated as `1`, as the capacity only ever grows by doubling.
    pub fn set_initial_capacity(&mut self, capacity: NumNodes) {
        self.initial_capacity = capacity.max(1);
    }

    pub fn initial_capacity(mut self, capacity: NumNodes) -> Self {
        self.set_initial_capacity(capacity);
        self
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn get_representation(&self) -> Representation {
        self.representation
    }

    pub fn get_initial_capacity(&self) -> NumNodes {
        self.initial_capacity
    }

    /// Creates an empty graph with this configuration.
    ///
    /// Fails with [`GraphError::CapacityExceeded`](crate::GraphError::CapacityExceeded) if
    /// the initial capacity exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY) or cannot be
    /// allocated.
    pub fn build(&self) -> crate::Result<Graph> {
        Graph::with_config(*self)
    }
}
