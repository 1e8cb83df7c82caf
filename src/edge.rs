use std::fmt::{Debug, Display};

use crate::Node;

/// Edge weights are plain `f64` values. Negative weights are legal, infinite ones are not.
pub type Weight = f64;

/// Sentinel that encodes "no edge" in the matrix backend and "unreached" in distance
/// vectors. It is never a legal edge weight.
pub const NO_EDGE: Weight = f64::INFINITY;

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Returns *true* if `weight` may be stored as an edge weight, i.e. if it is finite
#[inline]
pub fn is_valid_weight(weight: Weight) -> bool {
    weight.is_finite()
}

/// A weighted edge defined by its two endpoints.
/// Is is up to the graph whether an edge is directed or not.
///
/// This is the output type of the spanning tree algorithms and of [`crate::ops::AdjacencyList::edges`].
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct WeightedEdge {
    pub from: Node,
    pub to: Node,
    pub weight: Weight,
}

impl Display for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}:{})", self.from, self.to, self.weight)
    }
}

impl Debug for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl WeightedEdge {
    pub const fn new(from: Node, to: Node, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Self::new(self.from.min(self.to), self.from.max(self.to), self.weight)
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.from <= self.to
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }

    /// Returns the endpoints as a tuple
    pub fn endpoints(&self) -> (Node, Node) {
        (self.from, self.to)
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from(value: (Node, Node, Weight)) -> Self {
        WeightedEdge::new(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Weight)> for WeightedEdge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        WeightedEdge::new(value.0, value.1, value.2)
    }
}

impl From<&WeightedEdge> for WeightedEdge {
    fn from(value: &WeightedEdge) -> Self {
        *value
    }
}

/// Sums up the weights of a collection of edges
pub fn total_weight<'a, I>(edges: I) -> Weight
where
    I: IntoIterator<Item = &'a WeightedEdge>,
{
    edges.into_iter().map(|e| e.weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_validity() {
        assert!(is_valid_weight(0.0));
        assert!(is_valid_weight(-3.5));
        assert!(is_valid_weight(f64::MIN));
        assert!(!is_valid_weight(f64::NEG_INFINITY));
        assert!(!is_valid_weight(NO_EDGE));
        assert!(!is_valid_weight(f64::NAN));
    }

    #[test]
    fn normalize_and_reverse() {
        let e = WeightedEdge::new(4, 1, 2.5);
        assert!(!e.is_normalized());
        assert_eq!(e.normalized(), WeightedEdge::new(1, 4, 2.5));
        assert_eq!(e.reverse(), WeightedEdge::new(1, 4, 2.5));
        assert!(WeightedEdge::new(3, 3, 0.0).is_loop());
        assert_eq!(format!("{e}"), "(4,1:2.5)");
    }

    #[test]
    fn sum_of_weights() {
        let edges = [WeightedEdge::new(0, 1, 1.0), WeightedEdge::new(1, 2, 2.0)];
        assert_eq!(total_weight(&edges), 3.0);
    }
}
