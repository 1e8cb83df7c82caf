/*!
# Graph Algorithms

All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and gain access to traversals, shortest paths, spanning trees, connectivity and
topological ordering.

Algorithms are provided as extension traits implemented for every graph, e.g.
`graph.bfs(start)` or `graph.dijkstra(source)`. Traversals and topological search are
lazy **iterators**; everything else returns its result in one piece.
*/

mod connectivity;
mod mst;
mod ordering;
mod shortest_path;
mod traversal;
mod union_find;

use crate::{ops::*, *};

pub use connectivity::*;
pub use mst::*;
pub use ordering::*;
pub use shortest_path::*;
pub use traversal::*;
pub use union_find::*;
