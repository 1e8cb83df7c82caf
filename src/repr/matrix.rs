use std::{collections::TryReserveError, iter::Enumerate, slice::Iter};

use super::*;

/// Dense backend: a row-major `capacity x capacity` weight matrix in which
/// [`NO_EDGE`] marks a missing arc.
#[derive(Debug, Clone, Default)]
pub struct AdjMatrixStorage {
    capacity: usize,
    cells: Vec<Weight>,
}

/// Arcs of one matrix row in ascending order of target
#[derive(Debug, Clone)]
pub struct MatrixArcs<'a> {
    row: Enumerate<Iter<'a, Weight>>,
}

impl Iterator for MatrixArcs<'_> {
    type Item = (Node, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        self.row
            .by_ref()
            .find(|(_, w)| **w != NO_EDGE)
            .map(|(v, &w)| (v as Node, w))
    }
}

impl AdjMatrixStorage {
    #[inline]
    fn cell(&self, from: Node, to: Node) -> Option<usize> {
        let (from, to) = (from as usize, to as usize);
        (from < self.capacity && to < self.capacity).then(|| from * self.capacity + to)
    }
}

impl EdgeStorage for AdjMatrixStorage {
    type Arcs<'a> = MatrixArcs<'a>;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            cells: vec![NO_EDGE; capacity * capacity],
        }
    }

    fn grow(&mut self, capacity: usize) -> std::result::Result<(), TryReserveError> {
        debug_assert!(capacity >= self.capacity);
        let size = capacity.checked_mul(capacity).unwrap_or(usize::MAX);

        let mut cells = Vec::new();
        cells.try_reserve_exact(size)?;
        for row in self.cells.chunks_exact(self.capacity.max(1)) {
            cells.extend_from_slice(row);
            cells.resize(cells.len() + capacity - self.capacity, NO_EDGE);
        }
        cells.resize(size, NO_EDGE);

        self.capacity = capacity;
        self.cells = cells;
        Ok(())
    }

    fn insert_arc(&mut self, from: Node, to: Node, weight: Weight) -> bool {
        let idx = from as usize * self.capacity + to as usize;
        let was_absent = self.cells[idx] == NO_EDGE;
        self.cells[idx] = weight;
        was_absent
    }

    fn remove_arc(&mut self, from: Node, to: Node) -> bool {
        let Some(idx) = self.cell(from, to) else {
            return false;
        };
        let was_present = self.cells[idx] != NO_EDGE;
        self.cells[idx] = NO_EDGE;
        was_present
    }

    fn arc_weight(&self, from: Node, to: Node) -> Option<Weight> {
        let w = self.cells[self.cell(from, to)?];
        (w != NO_EDGE).then_some(w)
    }

    fn arcs_of(&self, from: Node) -> Self::Arcs<'_> {
        let start = from as usize * self.capacity;
        MatrixArcs {
            row: self.cells[start..start + self.capacity].iter().enumerate(),
        }
    }

    fn detach(&mut self, u: Node) -> (NumEdges, NumEdges) {
        let n = self.capacity;
        let u = u as usize;

        let mut outgoing = 0;
        for w in &mut self.cells[u * n..(u + 1) * n] {
            if *w != NO_EDGE {
                *w = NO_EDGE;
                outgoing += 1;
            }
        }

        let mut incoming = 0;
        for v in (0..n).filter(|&v| v != u) {
            let w = &mut self.cells[v * n + u];
            if *w != NO_EDGE {
                *w = NO_EDGE;
                incoming += 1;
            }
        }

        (outgoing, incoming)
    }
}
