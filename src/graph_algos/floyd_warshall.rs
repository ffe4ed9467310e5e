use crate::graph::Graph;
use super::Route;

use std::{fmt, hash::Hash, fmt::Debug};


/// All pairs shortest distances using the Floyd-Warshall algorithm
/// https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm
///
/// O(n^3) time and O(n^2) memory; meant for network reports on small graphs.
/// Use `distances_from` when only one start node matters.
pub fn all_pairs<N>(graph: &Graph<N>) -> DistanceMatrix<'_, N>
where
    N: Eq + Hash + Clone + Debug,
    {

    let n = graph.len();
    let mut distances = vec![f64::INFINITY; n * n];
    let mut next: Vec<Option<usize>> = vec![None; n * n];

    // Distance of a node to itself is zero
    for i in 0..n {
        distances[i * n + i] = 0.0;
        next[i * n + i] = Some(i);
    }

    // Direct edges
    for (from, to, weight) in graph.edges() {
        let (Some(i), Some(j)) = (graph.index_of(from), graph.index_of(to)) else {
            continue;
        };
        if weight < distances[i * n + j] {
            distances[i * n + j] = weight;
            next[i * n + j] = Some(j);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let via_k = distances[i * n + k];
            if via_k == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let candidate = via_k + distances[k * n + j];
                if candidate < distances[i * n + j] {
                    distances[i * n + j] = candidate;
                    next[i * n + j] = next[i * n + k];
                }
            }
        }
    }

    tracing::debug!(nodes = n, "computed all pairs distances");
    DistanceMatrix { graph, distances, next }
}


/// Shortest distance between every ordered pair of nodes
#[derive(Debug)]
pub struct DistanceMatrix<'g, N> {
    graph: &'g Graph<N>,
    distances: Vec<f64>, // row major, graph.len() x graph.len()
    next: Vec<Option<usize>>, // first hop on the shortest path from row to column
}

impl<'g, N> DistanceMatrix<'g, N>
where
    N: Eq + Hash + Clone + Debug,
    {

    /// Shortest distance from -> to, infinite when unreachable or unknown
    pub fn distance(&self, from: &N, to: &N) -> f64 {
        match (self.graph.index_of(from), self.graph.index_of(to)) {
            (Some(i), Some(j)) => self.distances[i * self.graph.len() + j],
            _ => f64::INFINITY,
        }
    }

    /// Route from -> to following the recorded first hops
    pub fn route(&self, from: &N, to: &N) -> Route<N> {
        let (Some(mut current), Some(goal)) = (self.graph.index_of(from), self.graph.index_of(to)) else {
            return Route::NoPath;
        };
        let n = self.graph.len();
        let cost = self.distances[current * n + goal];

        let mut path = Vec::new();
        loop {
            let Some(node) = self.graph.node_at(current) else {
                return Route::NoPath;
            };
            path.push(node.clone());
            if current == goal {
                break;
            }
            // a hop chain longer than the node count would mean a broken table
            if path.len() > n {
                return Route::NoPath;
            }
            match self.next[current * n + goal] {
                Some(hop) => current = hop,
                None => return Route::NoPath,
            }
        }

        Route::Found { path, cost }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'g N> {
        self.graph.nodes()
    }
}

/// One line per ordered pair, e.g. `A -> B: cost 3` or `A -> E: no path`
impl<N> fmt::Display for DistanceMatrix<'_, N>
where
    N: Eq + Hash + Clone + Debug + fmt::Display,
    {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.graph.len();
        for (i, from) in self.graph.nodes().enumerate() {
            for (j, to) in self.graph.nodes().enumerate() {
                let distance = self.distances[i * n + j];
                if distance.is_finite() {
                    writeln!(f, "{from} -> {to}: cost {distance}")?;
                } else {
                    writeln!(f, "{from} -> {to}: no path")?;
                }
            }
        }
        Ok(())
    }
}
