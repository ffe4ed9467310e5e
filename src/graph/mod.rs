pub mod loader;

use crate::collections::FxIndexMap;
use crate::errors::GraphError;
use crate::geometry::Point;

use std::{hash::Hash, fmt::Debug};
use kdtree::KdTree;
use kdtree::distance::squared_euclidean as kt_squared_euclidean;


/// Weighted directed graph keyed by node identifier
///
/// Each node maps its neighbors to the cost of the edge leading there.
/// Nodes keep their insertion order, which makes iteration (and anything
/// rendered from it) deterministic.
///
/// The graph belongs to the caller; the search algorithms only borrow it.
#[derive(Clone, Debug)]
pub struct Graph<N> {
    adjacency: FxIndexMap<N, FxIndexMap<N, f64>>,
    positions: FxIndexMap<N, Point>,
    kinds: FxIndexMap<N, String>, // role of the node, e.g. Factory or Retailer
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            adjacency: FxIndexMap::default(),
            positions: FxIndexMap::default(),
            kinds: FxIndexMap::default(),
        }
    }
}

impl<N> Graph<N>
where
    N: Eq + Hash + Clone + Debug,
{

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: FxIndexMap::with_capacity_and_hasher(nodes, Default::default()),
            positions: FxIndexMap::default(),
            kinds: FxIndexMap::default(),
        }
    }

    /// Add a node without edges, returns false if it already existed
    pub fn add_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, FxIndexMap::default());
        true
    }

    /// Add a node (if missing) and set its position
    pub fn add_node_at(&mut self, node: N, position: Point) {
        self.add_node(node.clone());
        self.positions.insert(node, position);
    }

    /// Add a node (if missing) and tag it with a kind
    pub fn set_kind(&mut self, node: N, kind: impl Into<String>) {
        self.add_node(node.clone());
        self.kinds.insert(node, kind.into());
    }

    /// Add a directed edge, replacing the weight of an existing one
    /// Both endpoints become nodes of the graph
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.add_node(from.clone());
        self.add_node(to.clone());
        if let Some(edges) = self.adjacency.get_mut(&from) {
            edges.insert(to, weight);
        }
    }

    /// Add the edge in both directions with the same weight
    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: f64) {
        self.add_edge(a.clone(), b.clone(), weight);
        self.add_edge(b, a, weight);
    }

    pub fn contains(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Neighbors of a node with the edge weights
    /// Unknown nodes have no neighbors
    pub fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = (&'a N, f64)> + use<'a, N> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(neighbor, &weight)| (neighbor, weight)))
    }

    /// Weight of the direct edge from -> to
    pub fn weight(&self, from: &N, to: &N) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    /// All edges as (from, to, weight)
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> {
        self.adjacency.iter().flat_map(|(from, edges)| {
            edges.iter().map(move |(to, &weight)| (from, to, weight))
        })
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    pub fn position(&self, node: &N) -> Option<&Point> {
        self.positions.get(node)
    }

    pub fn kind(&self, node: &N) -> Option<&str> {
        self.kinds.get(node).map(String::as_str)
    }

    /// Index of a node in insertion order
    pub(crate) fn index_of(&self, node: &N) -> Option<usize> {
        self.adjacency.get_index_of(node)
    }

    pub(crate) fn node_at(&self, index: usize) -> Option<&N> {
        self.adjacency.get_index(index).map(|(node, _)| node)
    }

    /// Total cost of walking the path hop by hop
    /// Returns None if any hop has no edge
    pub fn path_cost(&self, path: &[N]) -> Option<f64> {
        match path {
            [] => None,
            [node] => self.contains(node).then_some(0.0),
            _ => path
                .windows(2)
                .map(|hop| self.weight(&hop[0], &hop[1]))
                .sum(),
        }
    }

    /// Positioned node closest to the point
    /// Returns Ok(None) if no node has a finite position
    pub fn nearest_node(&self, point: &Point) -> Result<Option<&N>, GraphError> {
        if self.positions.is_empty() {
            return Ok(None);
        }

        // Tree stores point -> index in positions
        let mut tree: KdTree<f64, usize, [f64; 2]> = KdTree::with_capacity(2, self.positions.len());
        // Non-finite positions cannot be indexed, leave them out of the search
        for (index, position) in self.positions.values().enumerate().filter(|(_, p)| p.is_finite()) {
            tree.add([position.x, position.y], index)?;
        }

        let closest = tree.nearest(&[point.x, point.y], 1, &kt_squared_euclidean)?;
        Ok(closest
            .first()
            .and_then(|&(_, &index)| self.positions.get_index(index))
            .map(|(node, _)| node))
    }
}

impl FromIterator<(String, String, f64)> for Graph<String> {
    fn from_iter<I: IntoIterator<Item = (String, String, f64)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        for (from, to, weight) in iter {
            graph.add_edge(from, to, weight);
        }
        graph
    }
}
