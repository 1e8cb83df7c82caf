use tracing::trace;

use super::*;

/// Tracks which vertex ids are present.
///
/// The registry owns the *capacity* of a graph: every id `< capacity` has a slot in the
/// presence bitset and in the edge backend. Capacity only ever grows.
#[derive(Debug, Clone)]
pub struct VertexRegistry {
    present: NodeBitSet,
    count: NumNodes,
}

impl VertexRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            present: node_bitset(capacity),
            count: 0,
        }
    }

    /// Number of vertex slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.present.len()
    }

    /// Number of present vertices
    #[inline]
    pub fn len(&self) -> NumNodes {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns *true* if `u` is present. Ids beyond the capacity are never present.
    #[inline]
    pub fn contains(&self, u: Node) -> bool {
        self.present.contains(u as usize)
    }

    /// Marks `u` as present and returns *true* if it was absent before.
    /// ** Panics if `u >= capacity` **
    pub fn insert(&mut self, u: Node) -> bool {
        if self.present.put(u as usize) {
            false
        } else {
            self.count += 1;
            true
        }
    }

    /// Marks `u` as absent and returns *true* if it was present before.
    pub fn remove(&mut self, u: Node) -> bool {
        if !self.contains(u) {
            return false;
        }
        self.present.set(u as usize, false);
        self.count -= 1;
        true
    }

    /// Present vertices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.present.ones().map(|u| u as Node)
    }

    /// Bitset of present vertices, one bit per slot
    #[inline]
    pub fn presence(&self) -> &NodeBitSet {
        &self.present
    }

    pub(crate) fn grow(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.capacity());
        trace!(from = self.capacity(), to = capacity, "growing vertex registry");
        self.present.grow(capacity);
    }
}

/// Returns the capacity required to hold id `u` if the current `capacity` is not
/// sufficient: the current capacity is doubled until it exceeds `u`, but not beyond
/// [`MAX_CAPACITY`] unless `u` itself does not fit below it.
/// Returns `None` if no growth is needed.
pub(crate) fn grown_capacity(capacity: usize, u: Node) -> Option<usize> {
    let required = u as usize + 1;
    if required <= capacity {
        return None;
    }

    let mut new_capacity = capacity.max(1);
    while new_capacity < required {
        new_capacity *= 2;
    }
    Some(new_capacity.min(required.max(MAX_CAPACITY as usize)))
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn doubling() {
        assert_eq!(grown_capacity(8, 7), None);
        assert_eq!(grown_capacity(8, 8), Some(16));
        assert_eq!(grown_capacity(8, 100), Some(128));
        assert_eq!(grown_capacity(1, 0), None);
        assert_eq!(grown_capacity(1, 1), Some(2));
        assert_eq!(grown_capacity(0, 0), Some(1));

        // doubling stops at the limit, ids beyond it are reported as is
        assert_eq!(grown_capacity(3, MAX_CAPACITY - 1), Some(MAX_CAPACITY as usize));
        assert_eq!(grown_capacity(8, MAX_CAPACITY), Some(MAX_CAPACITY as usize + 1));
    }

    #[test]
    fn insert_remove() {
        let mut reg = VertexRegistry::new(8);
        assert!(reg.is_empty());
        assert!(reg.insert(3));
        assert!(!reg.insert(3));
        assert!(reg.insert(5));
        assert_eq!(reg.len(), 2);
        assert!(reg.contains(3));
        assert!(!reg.contains(4));
        assert!(!reg.contains(1000));

        assert!(reg.remove(3));
        assert!(!reg.remove(3));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.iter().collect_vec(), vec![5]);

        reg.grow(32);
        assert_eq!(reg.capacity(), 32);
        assert!(reg.contains(5));
        assert!(reg.insert(31));
        assert_eq!(reg.presence().count_ones(..), reg.len() as usize);
    }
}
