
pub mod dijkstra;
pub mod floyd_warshall;
mod shortest_path;

pub use dijkstra::{shortest_path, distances_from, ShortestPathTree};
pub use floyd_warshall::{all_pairs, DistanceMatrix};

use serde::Serialize;


/// Per query search table, indexed by the graph's node index
/// The tuple contains (predecessor_index, distance) where:
/// - predecessor_index is the node that currently yields the best distance,
///   None for the start node and for unreached nodes
/// - distance is the best known cost from the start, infinite until reached
pub(crate) type SearchTable = Vec<(Option<usize>, f64)>;


/// Outcome of a route query
/// An unreachable or unknown target is a normal result, not an error
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Route<N> {
    /// Ordered nodes from start to end (both included) and the summed edge cost
    Found { path: Vec<N>, cost: f64 },
    NoPath,
}

impl<N> Route<N> {

    pub fn is_found(&self) -> bool {
        matches!(self, Route::Found { .. })
    }

    /// Route cost, infinite when there is no path
    pub fn cost(&self) -> f64 {
        match self {
            Route::Found { cost, .. } => *cost,
            Route::NoPath => f64::INFINITY,
        }
    }

    pub fn path(&self) -> Option<&[N]> {
        match self {
            Route::Found { path, .. } => Some(path),
            Route::NoPath => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<N>> {
        match self {
            Route::Found { path, .. } => Some(path),
            Route::NoPath => None,
        }
    }
}
