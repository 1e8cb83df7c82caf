/*!
# Node Representation

We choose `Node = u32` as almost all use-cases involve less than `2^32` nodes.
A node id is at the same time its *identity*: there are no per-node handles, every
per-node attribute lives in a dense vector (or bitset) indexed by the id.

Ids do not have to be contiguous. The graph tracks which ids are *present* and
grows its storage whenever a larger id is inserted.
*/

use fixedbitset::FixedBitSet;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// Largest number of vertex slots a graph can hold; valid ids are smaller than this
pub const MAX_CAPACITY: NumNodes = 1 << 31;

/// BitSet for Nodes, one bit per id up to the capacity of the graph
pub type NodeBitSet = FixedBitSet;

/// Small helper to build a visited-set for `capacity` many node ids
#[inline]
pub(crate) fn node_bitset(capacity: usize) -> NodeBitSet {
    NodeBitSet::with_capacity(capacity)
}
