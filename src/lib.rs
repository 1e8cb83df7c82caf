/*!
`wgraphs` is a small engine for **weighted** graphs, directed or undirected, stored either
as adjacency lists or as an adjacency matrix.

# Representation

We represent **nodes** as `u32` ids. Ids do not have to be contiguous: a graph keeps track
of which ids are present and grows its storage by doubling whenever a larger id is added.
Weights are `f64`; [`NO_EDGE`] (positive infinity) marks "no edge" and "unreachable".
Edges are returned as [`WeightedEdge`] `{ from, to, weight }`.

### Directed vs Undirected

- In an **undirected** graph, adding `(u, v, w)` also adds `(v, u, w)`; both count as one edge.
- In a **directed** graph, `(u, v)` and `(v, u)` are distinct edges.

### Backends

The backend is chosen once via [`Representation`]:

- `List`: per-vertex arrays, neighbors in insertion order, cheap for sparse graphs
- `Matrix`: a dense weight matrix, neighbors in ascending id order, constant-time lookup

Both behave identically apart from neighbor order, which is observable in traversal output.

# Usage

- [`prelude`] includes node and edge definitions, configuration, errors, the graph
  operation traits and [`Graph`] itself,
- [`algo`] includes traversals (BFS/DFS), shortest paths (Dijkstra, Bellman-Ford,
  Floyd-Warshall), minimum spanning trees (Prim, Kruskal), connected and strongly
  connected components as well as topological sorting and cycle detection.

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use wgraphs::{prelude::*, algo::*};

let mut g = GraphConfig::new().directed().representation(Representation::Matrix).build().unwrap();
g.add_edges([(0, 1, 4.0), (0, 2, 1.0), (2, 1, 2.0)]).unwrap();

let dist = g.dijkstra(0).unwrap();
assert_eq!(dist[1], 3.0);
assert_eq!(g.topological_sort().unwrap(), vec![0, 2, 1]);
```

Operations that could fail return [`Result`] with a [`GraphError`]; the crate logs through
[`tracing`] and never installs a subscriber itself.
*/

pub mod algo;
pub mod config;
pub mod edge;
pub mod error;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;

pub use config::*;
pub use edge::*;
pub use error::*;
pub use node::*;
pub use repr::Graph;

/// `wgraphs::prelude` includes definitions for nodes, edges, configuration and errors, all basic graph operation traits as well as the graph itself.
pub mod prelude {
    pub use super::{config::*, edge::*, error::*, node::*, ops::*, repr::*};
}
