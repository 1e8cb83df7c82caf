use std::{collections::TryReserveError, slice::Iter};

use super::*;

/// Single stored arc of the list backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRecord {
    pub to: Node,
    pub weight: Weight,
}

/// Sparse backend: one unsorted arc array per vertex slot.
///
/// Arcs keep their insertion order; updating the weight of an existing arc does not
/// move it.
#[derive(Debug, Clone, Default)]
pub struct AdjListStorage {
    adj: Vec<Vec<EdgeRecord>>,
}

#[derive(Debug, Clone)]
pub struct ListArcs<'a> {
    records: Iter<'a, EdgeRecord>,
}

impl Iterator for ListArcs<'_> {
    type Item = (Node, Weight);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|r| (r.to, r.weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl EdgeStorage for AdjListStorage {
    type Arcs<'a> = ListArcs<'a>;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            adj: vec![Vec::new(); capacity],
        }
    }

    fn grow(&mut self, capacity: usize) -> std::result::Result<(), TryReserveError> {
        debug_assert!(capacity >= self.adj.len());
        self.adj.try_reserve_exact(capacity - self.adj.len())?;
        self.adj.resize_with(capacity, Vec::new);
        Ok(())
    }

    fn insert_arc(&mut self, from: Node, to: Node, weight: Weight) -> bool {
        let arcs = &mut self.adj[from as usize];
        if let Some(record) = arcs.iter_mut().find(|r| r.to == to) {
            record.weight = weight;
            false
        } else {
            arcs.push(EdgeRecord { to, weight });
            true
        }
    }

    fn remove_arc(&mut self, from: Node, to: Node) -> bool {
        let Some(arcs) = self.adj.get_mut(from as usize) else {
            return false;
        };
        if let Some(pos) = arcs.iter().position(|r| r.to == to) {
            arcs.remove(pos);
            true
        } else {
            false
        }
    }

    fn arc_weight(&self, from: Node, to: Node) -> Option<Weight> {
        self.adj
            .get(from as usize)?
            .iter()
            .find(|r| r.to == to)
            .map(|r| r.weight)
    }

    fn arcs_of(&self, from: Node) -> Self::Arcs<'_> {
        ListArcs {
            records: self.adj[from as usize].iter(),
        }
    }

    fn detach(&mut self, u: Node) -> (NumEdges, NumEdges) {
        let outgoing = std::mem::take(&mut self.adj[u as usize]).len() as NumEdges;

        let mut incoming = 0;
        for (v, arcs) in self.adj.iter_mut().enumerate() {
            if v == u as usize {
                continue;
            }
            let before = arcs.len();
            arcs.retain(|r| r.to != u);
            incoming += (before - arcs.len()) as NumEdges;
        }

        (outgoing, incoming)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn insert_overwrites() {
        let mut storage = AdjListStorage::with_capacity(4);
        assert!(storage.insert_arc(0, 2, 1.0));
        assert!(storage.insert_arc(0, 1, 2.0));
        assert!(!storage.insert_arc(0, 2, 5.0));

        assert_eq!(storage.arcs_of(0).collect_vec(), vec![(2, 5.0), (1, 2.0)]);
        assert_eq!(storage.arc_weight(0, 2), Some(5.0));
        assert_eq!(storage.arc_weight(2, 0), None);
        assert_eq!(storage.arc_weight(17, 0), None);
    }

    #[test]
    fn grow_keeps_arcs() {
        let mut storage = AdjListStorage::with_capacity(2);
        storage.insert_arc(1, 0, -1.0);
        storage.grow(8).unwrap();
        storage.insert_arc(7, 1, 3.0);

        assert_eq!(storage.arc_weight(1, 0), Some(-1.0));
        assert_eq!(storage.arc_weight(7, 1), Some(3.0));
    }

    #[test]
    fn detach_counts() {
        let mut storage = AdjListStorage::with_capacity(4);
        storage.insert_arc(0, 1, 1.0);
        storage.insert_arc(1, 1, 1.0);
        storage.insert_arc(1, 2, 1.0);
        storage.insert_arc(2, 1, 1.0);
        storage.insert_arc(3, 1, 1.0);

        assert_eq!(storage.detach(1), (2, 3));
        assert_eq!(storage.arcs_of(1).count(), 0);
        assert!(!storage.remove_arc(0, 1));
        assert!(!storage.remove_arc(9, 1));
    }
}
