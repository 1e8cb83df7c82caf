/*!
Graph traversals.

All three traversals are lazy iterators over the vertices reachable from a start vertex,
reported in discovery order. Starting at an absent vertex yields nothing.

- [`BFS`] marks a vertex when it is enqueued and visits neighbors in adjacency order.
- [`DFS`] is the stack-based depth-first search: a vertex is marked when it is popped,
  and its unvisited neighbors are pushed in *reverse* adjacency order so that the first
  neighbor is explored first.
- [`RecursiveDFS`] reports vertices in the preorder of the textbook recursive DFS, but
  keeps the recursion on an explicit stack of neighbor iterators.

Both depth-first variants report the same order; [`RecursiveDFS`] additionally exposes
the current path length.
*/

use std::{collections::VecDeque, iter::FusedIterator};

use tracing::debug;

use super::*;

/// Breadth-first search from a single start vertex
pub struct BFS<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    visited: NodeBitSet,
    queue: VecDeque<Node>,
}

impl<'a, G> BFS<'a, G>
where
    G: AdjacencyList,
{
    /// Creates a new traversal iterator starting from `start`
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut visited = graph.vertex_bitset_unset();
        let mut queue = VecDeque::new();
        if graph.has_vertex(start) {
            visited.insert(start as usize);
            queue.push_back(start);
        }
        Self {
            graph,
            visited,
            queue,
        }
    }

    /// Returns *true* if `u` was discovered so far
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.contains(u as usize)
    }

    /// Tries to restart the search at the smallest unvisited vertex and returns
    /// *true* iff successful. Requires that the search came to a hold earlier,
    /// i.e. `self.next()` returned `None`.
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        debug_assert!(self.queue.is_empty());
        match self.graph.vertices().find(|&u| !self.did_visit_node(u)) {
            None => false,
            Some(u) => {
                self.visited.insert(u as usize);
                self.queue.push_back(u);
                true
            }
        }
    }
}

impl<G> Iterator for BFS<'_, G>
where
    G: AdjacencyList,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.neighbors_of(u) {
            if !self.visited.put(v as usize) {
                self.queue.push_back(v);
            }
        }

        Some(u)
    }
}

/// Stack-based depth-first search from a single start vertex
pub struct DFS<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    visited: NodeBitSet,
    stack: Vec<Node>,
    buffer: Vec<Node>,
}

impl<'a, G> DFS<'a, G>
where
    G: AdjacencyList,
{
    /// Creates a new traversal iterator starting from `start`
    pub fn new(graph: &'a G, start: Node) -> Self {
        let stack = if graph.has_vertex(start) {
            vec![start]
        } else {
            Vec::new()
        };
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            stack,
            buffer: Vec::new(),
        }
    }
}

impl<G> Iterator for DFS<'_, G>
where
    G: AdjacencyList,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let u = self.stack.pop()?;
            if self.visited.put(u as usize) {
                continue;
            }

            self.buffer.clear();
            self.buffer.extend(
                self.graph
                    .neighbors_of(u)
                    .filter(|&v| !self.visited.contains(v as usize)),
            );
            self.stack.extend(self.buffer.iter().rev());

            return Some(u);
        }
    }
}

/// Depth-first search in recursive preorder without using the call stack.
///
/// Every frame holds the remaining neighbors of a vertex on the current DFS path. A
/// vertex is reported when its frame is pushed.
pub struct RecursiveDFS<'a, G>
where
    G: AdjacencyList + 'a,
{
    graph: &'a G,
    visited: NodeBitSet,
    start: Option<Node>,
    frames: Vec<G::NeighborIter<'a>>,
}

impl<'a, G> RecursiveDFS<'a, G>
where
    G: AdjacencyList + 'a,
{
    /// Creates a new traversal iterator starting from `start`
    pub fn new(graph: &'a G, start: Node) -> Self {
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            start: graph.has_vertex(start).then_some(start),
            frames: Vec::new(),
        }
    }

    /// Length of the current DFS path
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn enter(&mut self, u: Node) -> Node {
        self.visited.insert(u as usize);
        self.frames.push(self.graph.weighted_neighbors_of(u));
        u
    }
}

impl<'a, G> Iterator for RecursiveDFS<'a, G>
where
    G: AdjacencyList + 'a,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            return Some(self.enter(start));
        }

        while let Some(frame) = self.frames.last_mut() {
            let visited = &self.visited;
            if let Some((v, _)) = frame.find(|&(v, _)| !visited.contains(v as usize)) {
                return Some(self.enter(v));
            }
            self.frames.pop();
        }

        None
    }
}

impl<G: AdjacencyList> FusedIterator for BFS<'_, G> {}
impl<G: AdjacencyList> FusedIterator for DFS<'_, G> {}
impl<'a, G: AdjacencyList + 'a> FusedIterator for RecursiveDFS<'a, G> {}

/// Provides traversal methods directly on graphs
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses vertices reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(
    ///     Direction::Undirected,
    ///     Representation::List,
    ///     [(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0)],
    /// ).unwrap();
    ///
    /// let order: Vec<_> = g.bfs(0).collect();
    /// assert_eq!(order, vec![0, 1, 2, 3]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        debug!(start, "bfs");
        BFS::new(self, start)
    }

    /// Returns an iterator that traverses vertices reachable from `start`
    /// in stack-based **depth-first search (DFS) order**.
    fn dfs_iterative(&self, start: Node) -> DFS<'_, Self> {
        debug!(start, "iterative dfs");
        DFS::new(self, start)
    }

    /// Returns an iterator that traverses vertices reachable from `start` in the
    /// preorder of a recursive **depth-first search**.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(
    ///     Direction::Directed,
    ///     Representation::List,
    ///     [(0, 2, 1.0), (0, 1, 1.0), (2, 3, 1.0)],
    /// ).unwrap();
    ///
    /// let order: Vec<_> = g.dfs_recursive(0).collect();
    /// assert_eq!(order, vec![0, 2, 3, 1]);
    /// ```
    fn dfs_recursive(&self, start: Node) -> RecursiveDFS<'_, Self> {
        debug!(start, "recursive dfs");
        RecursiveDFS::new(self, start)
    }

    /// Returns *true* if there is a (directed) path from `u` to `v`.
    /// Every present vertex reaches itself.
    fn is_reachable(&self, u: Node, v: Node) -> bool {
        self.bfs(u).any(|x| x == v)
    }
}

impl<G: AdjacencyList> Traversal for G {}
