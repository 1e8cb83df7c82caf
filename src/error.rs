use thiserror::Error;

use crate::{Node, Weight};

/// Errors reported by graph mutations and algorithms.
///
/// Queries on absent vertices never fail; they return `false`, `None` or an empty
/// collection instead. Errors are reserved for rejected mutations, violated algorithm
/// preconditions and infeasible results.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GraphError {
    #[error("vertex {0} is not present in the graph")]
    InvalidVertex(Node),

    #[error("weight {0} cannot be stored as an edge weight")]
    InvalidWeight(Weight),

    #[error("operation requires an undirected graph")]
    RequiresUndirected,

    #[error("operation requires a directed graph")]
    RequiresDirected,

    #[error("negative cycle reachable from the source vertex")]
    NegativeCycle,

    #[error("graph contains a cycle")]
    CycleDetected,

    #[error("cannot grow vertex storage to hold id {requested}")]
    CapacityExceeded { requested: Node },
}

pub type Result<T> = std::result::Result<T, GraphError>;
