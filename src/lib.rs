//! Shortest routes between named locations in weighted graphs.
//!
//! ```
//! use routefinder::{Graph, Route, shortest_path};
//!
//! let mut graph = Graph::new();
//! graph.add_undirected_edge("A", "B", 1.0);
//! graph.add_undirected_edge("B", "C", 2.0);
//! graph.add_undirected_edge("A", "C", 4.0);
//!
//! let route = shortest_path(&graph, &"A", &"C");
//! assert_eq!(route, Route::Found { path: vec!["A", "B", "C"], cost: 3.0 });
//! ```

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod logging;
pub mod queue;
pub mod render;

pub use errors::{GraphError, LoaderError, RouteFinderError};
pub use geometry::Point;
pub use graph::Graph;
pub use graph::loader::{load_graph, parse_graph, NodeRecord};
pub use graph_algos::{all_pairs, distances_from, shortest_path, DistanceMatrix, Route, ShortestPathTree};
pub use queue::{MinHeap, Priority};
