/*!
# Graph Representation

A [`Graph`] combines a [`VertexRegistry`] (which ids are present) with one of two edge
backends, chosen at construction via [`Representation`]:

- [`AdjListStorage`]: per-vertex arrays of `(target, weight)` records.
  Neighbors are reported in insertion order.
- [`AdjMatrixStorage`]: a dense `capacity x capacity` weight matrix.
  Neighbors are reported in ascending id order.

Both backends store *arcs* only. Mirroring undirected edges, validating endpoints and
weights as well as growing the storage is done once in [`Graph`] for both of them.
*/

use std::collections::TryReserveError;

use crate::{ops::*, *};

mod graph;
mod list;
mod matrix;
mod registry;

pub use graph::*;
pub use list::*;
pub use matrix::*;
pub use registry::*;

/// Arc storage shared by both backends.
///
/// All node arguments must be smaller than the current capacity unless stated otherwise.
pub trait EdgeStorage: Clone + Default {
    type Arcs<'a>: Iterator<Item = (Node, Weight)> + Clone + 'a
    where
        Self: 'a;

    /// Creates an empty storage with `capacity` vertex slots
    fn with_capacity(capacity: usize) -> Self;

    /// Like [`EdgeStorage::with_capacity`], but reports allocation failure instead of
    /// aborting
    fn try_with_capacity(capacity: usize) -> std::result::Result<Self, TryReserveError> {
        let mut storage = Self::default();
        storage.grow(capacity)?;
        Ok(storage)
    }

    /// Grows the storage to `capacity` vertex slots, keeping all arcs.
    /// Leaves the storage untouched if the allocation fails.
    fn grow(&mut self, capacity: usize) -> std::result::Result<(), TryReserveError>;

    /// Inserts or overwrites the arc `(from, to)`.
    /// Returns *true* if the arc was not present before.
    fn insert_arc(&mut self, from: Node, to: Node, weight: Weight) -> bool;

    /// Removes the arc `(from, to)` and returns *true* if it was present.
    /// Out-of-range ids are tolerated.
    fn remove_arc(&mut self, from: Node, to: Node) -> bool;

    /// Returns the weight of the arc `(from, to)`. Out-of-range ids are tolerated.
    fn arc_weight(&self, from: Node, to: Node) -> Option<Weight>;

    /// Returns all arcs leaving `from`
    fn arcs_of(&self, from: Node) -> Self::Arcs<'_>;

    /// Removes all arcs leaving or entering `u`.
    /// Returns the number of removed outgoing arcs (including a self-loop) and the
    /// number of removed incoming arcs (excluding a self-loop).
    fn detach(&mut self, u: Node) -> (NumEdges, NumEdges);
}

/// Runtime choice between the two backends
#[derive(Debug, Clone)]
pub(crate) enum Backend {
    List(AdjListStorage),
    Matrix(AdjMatrixStorage),
}

macro_rules! dispatch {
    ($self:expr, $storage:ident => $body:expr) => {
        match $self {
            Backend::List($storage) => $body,
            Backend::Matrix($storage) => $body,
        }
    };
}

impl Backend {
    pub fn new(representation: Representation, capacity: usize) -> Self {
        match representation {
            Representation::List => Backend::List(AdjListStorage::with_capacity(capacity)),
            Representation::Matrix => Backend::Matrix(AdjMatrixStorage::with_capacity(capacity)),
        }
    }

    pub fn try_new(
        representation: Representation,
        capacity: usize,
    ) -> std::result::Result<Self, TryReserveError> {
        Ok(match representation {
            Representation::List => Backend::List(AdjListStorage::try_with_capacity(capacity)?),
            Representation::Matrix => Backend::Matrix(AdjMatrixStorage::try_with_capacity(capacity)?),
        })
    }

    pub fn representation(&self) -> Representation {
        match self {
            Backend::List(_) => Representation::List,
            Backend::Matrix(_) => Representation::Matrix,
        }
    }

    pub fn grow(&mut self, capacity: usize) -> std::result::Result<(), TryReserveError> {
        dispatch!(self, s => s.grow(capacity))
    }

    pub fn insert_arc(&mut self, from: Node, to: Node, weight: Weight) -> bool {
        dispatch!(self, s => s.insert_arc(from, to, weight))
    }

    pub fn remove_arc(&mut self, from: Node, to: Node) -> bool {
        dispatch!(self, s => s.remove_arc(from, to))
    }

    pub fn arc_weight(&self, from: Node, to: Node) -> Option<Weight> {
        dispatch!(self, s => s.arc_weight(from, to))
    }

    pub fn detach(&mut self, u: Node) -> (NumEdges, NumEdges) {
        dispatch!(self, s => s.detach(u))
    }

    /// Arcs leaving `from` whose target is set in `present`
    pub fn neighbors_of<'a>(&'a self, from: Node, present: &'a NodeBitSet) -> NeighborIter<'a> {
        let arcs = match self {
            Backend::List(s) => Arcs::List(s.arcs_of(from)),
            Backend::Matrix(s) => Arcs::Matrix(s.arcs_of(from)),
        };
        NeighborIter { arcs, present }
    }
}

#[derive(Debug, Clone)]
enum Arcs<'a> {
    List(ListArcs<'a>),
    Matrix(MatrixArcs<'a>),
    Empty,
}

/// Iterator over `(neighbor, weight)` pairs of a single vertex
#[derive(Debug, Clone)]
pub struct NeighborIter<'a> {
    arcs: Arcs<'a>,
    present: &'a NodeBitSet,
}

impl<'a> NeighborIter<'a> {
    /// Iterator that yields nothing
    pub(crate) fn empty(present: &'a NodeBitSet) -> Self {
        Self {
            arcs: Arcs::Empty,
            present,
        }
    }
}

impl Iterator for NeighborIter<'_> {
    type Item = (Node, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (v, w) = match &mut self.arcs {
                Arcs::List(it) => it.next()?,
                Arcs::Matrix(it) => it.next()?,
                Arcs::Empty => return None,
            };
            if self.present.contains(v as usize) {
                return Some((v, w));
            }
        }
    }
}
