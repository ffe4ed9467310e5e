use crate::graph::Graph;
use crate::queue::MinHeap;
use super::{shortest_path::reconstruct_path, Route, SearchTable};

use std::{hash::Hash, fmt::Debug};




/// Identify the shortest route using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start node, traverse through graph until the end node is settled
///
/// Edge weights are assumed non-negative; negative weights are not detected.
/// A start or end that is not a node of the graph yields `Route::NoPath`.
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, end = ?end))]
pub fn shortest_path<N>(graph: &Graph<N>, start: &N, end: &N) -> Route<N>
where
    N: Eq + Hash + Clone + Debug,
    {

    let (Some(start_index), Some(end_index)) = (graph.index_of(start), graph.index_of(end)) else {
        tracing::debug!("start or end is not in the graph");
        return Route::NoPath;
    };

    // Build the table - terminates when the end node is popped
    let table = build_dijkstra_table(graph, start_index, Some(end_index));

    route_from_table(graph, &table, start_index, end_index)
}


/// Returns the full table of the graph, includes all (reachable) nodes and costs
/// An unknown start produces a tree where every node is unreached
pub fn distances_from<'g, N>(graph: &'g Graph<N>, start: &N) -> ShortestPathTree<'g, N>
where
    N: Eq + Hash + Clone + Debug,
    {

    let start_index = graph.index_of(start);
    let table = match start_index {
        Some(index) => build_dijkstra_table(graph, index, None),
        None => vec![(None, f64::INFINITY); graph.len()],
    };

    ShortestPathTree { graph, start: start_index, table }
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns the predecessor and best known distance of every node
/// goal: stop as soon as this node index leaves the queue
fn build_dijkstra_table<N>(graph: &Graph<N>, start: usize, goal: Option<usize>) -> SearchTable
where
    N: Eq + Hash + Clone + Debug,
    {

    // Every node starts unreached, except start
    let mut table: SearchTable = vec![(None, f64::INFINITY); graph.len()];
    table[start].1 = 0.0;

    // Nodes to visit, smallest known cost first
    // Improving a node pushes a new entry; the old one goes stale and is skipped
    let mut nodes_to_visit: MinHeap<f64, usize> = MinHeap::new();
    nodes_to_visit.push(0.0, start);

    let mut settled = 0usize;

    while let Some((cost, index)) = nodes_to_visit.pop() {

        // First pop of the goal is final with non-negative weights
        if Some(index) == goal {
            break;
        }

        // If cost from the queue is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > table[index].1 {
            tracing::trace!(index, cost, best = table[index].1, "skipping stale entry");
            continue;
        }
        settled += 1;

        let Some(node) = graph.node_at(index) else {
            continue;
        };

        // loop over neighbors
        for (neighbor, edge_cost) in graph.neighbors(node) {
            let Some(neighbor_index) = graph.index_of(neighbor) else {
                continue;
            };

            // new cost to reach this node = edge cost + node cost
            let new_cost = cost + edge_cost;

            // Only add to the queue if we've found a better path
            if new_cost < table[neighbor_index].1 {
                table[neighbor_index] = (Some(index), new_cost);
                nodes_to_visit.push(new_cost, neighbor_index);
            }
        }
    }

    tracing::debug!(settled, queued = nodes_to_visit.len(), "search finished");
    table
}


/// Turn the table into a route to `goal`
fn route_from_table<N>(graph: &Graph<N>, table: &SearchTable, start: usize, goal: usize) -> Route<N>
where
    N: Eq + Hash + Clone + Debug,
    {

    let path = reconstruct_path(table, start, goal).and_then(|indices| {
        indices
            .into_iter()
            .map(|index| graph.node_at(index).cloned())
            .collect::<Option<Vec<N>>>()
    });

    match path {
        Some(path) => Route::Found { path, cost: table[goal].1 },
        None => Route::NoPath,
    }
}


/// Distances and predecessors from one start node to every node of a graph
#[derive(Debug)]
pub struct ShortestPathTree<'g, N> {
    graph: &'g Graph<N>,
    start: Option<usize>,
    table: SearchTable,
}

impl<'g, N> ShortestPathTree<'g, N>
where
    N: Eq + Hash + Clone + Debug,
    {

    /// Best distance from start, infinite for unreached or unknown nodes
    pub fn distance(&self, node: &N) -> f64 {
        self.graph
            .index_of(node)
            .and_then(|index| self.table.get(index))
            .map_or(f64::INFINITY, |&(_, distance)| distance)
    }

    /// Node preceding `node` on its shortest path, None for start,
    /// unreached and unknown nodes
    pub fn predecessor(&self, node: &N) -> Option<&'g N> {
        let index = self.graph.index_of(node)?;
        let predecessor = self.table.get(index)?.0?;
        self.graph.node_at(predecessor)
    }

    /// Route from start to `node`
    pub fn route_to(&self, node: &N) -> Route<N> {
        match (self.start, self.graph.index_of(node)) {
            (Some(start), Some(goal)) => route_from_table(self.graph, &self.table, start, goal),
            _ => Route::NoPath,
        }
    }

    /// Reached nodes with their distances, in graph order
    pub fn reached(&self) -> impl Iterator<Item = (&'g N, f64)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter(|(_, (_, distance))| distance.is_finite())
            .filter_map(|(index, &(_, distance))| self.graph.node_at(index).map(|node| (node, distance)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> String {
        name.to_string()
    }

    fn path(nodes: &[&str]) -> Vec<String> {
        nodes.iter().map(|n| n.to_string()).collect()
    }

    // Helper function to create the reference graph
    // A -1- B -2- C -1- D, plus A -4- C and B -5- D, both directions
    fn create_test_graph() -> Graph<String> {
        let mut graph = Graph::new();
        graph.add_undirected_edge(node("A"), node("B"), 1.0);
        graph.add_undirected_edge(node("A"), node("C"), 4.0);
        graph.add_undirected_edge(node("B"), node("C"), 2.0);
        graph.add_undirected_edge(node("B"), node("D"), 5.0);
        graph.add_undirected_edge(node("C"), node("D"), 1.0);
        graph
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();

        let route = shortest_path(&graph, &node("A"), &node("D"));

        assert_eq!(route, Route::Found { path: path(&["A", "B", "C", "D"]), cost: 4.0 });
    }

    #[test]
    fn test_start_equals_end() {
        let graph = create_test_graph();

        let route = shortest_path(&graph, &node("A"), &node("A"));

        assert_eq!(route, Route::Found { path: path(&["A"]), cost: 0.0 });
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        let mut graph = create_test_graph();
        graph.add_node(node("E"));

        let route = shortest_path(&graph, &node("A"), &node("E"));

        assert_eq!(route, Route::NoPath);
        assert_eq!(route.cost(), f64::INFINITY);
    }

    #[test]
    fn test_unknown_nodes() {
        let graph = create_test_graph();

        assert_eq!(shortest_path(&graph, &node("A"), &node("Z")), Route::NoPath);
        assert_eq!(shortest_path(&graph, &node("Z"), &node("A")), Route::NoPath);
        assert_eq!(shortest_path(&graph, &node("Z"), &node("Z")), Route::NoPath);
        assert_eq!(shortest_path(&Graph::new(), &node("A"), &node("A")), Route::NoPath);
    }

    #[test]
    fn test_directed_edges() {
        // D can be reached from A but not the other way round
        let mut graph: Graph<&str> = Graph::new();
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("B", "D", 1.0);

        assert!(shortest_path(&graph, &"A", &"D").is_found());
        assert_eq!(shortest_path(&graph, &"D", &"A"), Route::NoPath);
    }

    #[test]
    fn test_dijkstra_with_cycle() {
        // Create a graph with a cycle: A -> B -> C -> A
        let mut graph: Graph<&str> = Graph::new();
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("B", "C", 1.0);
        graph.add_edge("C", "A", 1.0);
        graph.add_edge("C", "D", 2.0);

        let tree = distances_from(&graph, &"A");

        assert_eq!(tree.distance(&"A"), 0.0);
        assert_eq!(tree.distance(&"B"), 1.0);
        assert_eq!(tree.distance(&"C"), 2.0);
        assert_eq!(tree.distance(&"D"), 4.0);
        assert_eq!(tree.route_to(&"D"), Route::Found { path: vec!["A", "B", "C", "D"], cost: 4.0 });
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        // C is first queued at cost 10, then improved to 3 via B
        let mut graph: Graph<&str> = Graph::new();
        graph.add_edge("A", "C", 10.0);
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("B", "C", 2.0);
        graph.add_edge("C", "D", 1.0);

        let tree = distances_from(&graph, &"A");

        assert_eq!(tree.distance(&"C"), 3.0);
        assert_eq!(tree.predecessor(&"C"), Some(&"B"));
        assert_eq!(tree.distance(&"D"), 4.0);
    }

    #[test]
    fn test_zero_weight_edges() {
        let mut graph: Graph<&str> = Graph::new();
        graph.add_edge("A", "B", 0.0);
        graph.add_edge("B", "C", 0.0);
        graph.add_edge("A", "C", 1.0);

        let route = shortest_path(&graph, &"A", &"C");
        assert_eq!(route, Route::Found { path: vec!["A", "B", "C"], cost: 0.0 });
    }

    #[test]
    fn test_early_exit_leaves_far_nodes_unsettled() {
        // A -> B (1) is the goal, C hangs far away behind D
        let mut graph: Graph<&str> = Graph::new();
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("A", "D", 10.0);
        graph.add_edge("D", "C", 5.0);

        let table = build_dijkstra_table(&graph, 0, graph.index_of(&"B"));
        let c = graph.index_of(&"C").unwrap();
        assert_eq!(table[c], (None, f64::INFINITY));

        let full = build_dijkstra_table(&graph, 0, None);
        assert_eq!(full[c].1, 15.0);
    }

    #[test]
    fn test_distances_from_unknown_start() {
        let graph = create_test_graph();
        let tree = distances_from(&graph, &node("Z"));

        assert_eq!(tree.distance(&node("A")), f64::INFINITY);
        assert_eq!(tree.route_to(&node("A")), Route::NoPath);
        assert_eq!(tree.reached().count(), 0);
    }

    #[test]
    fn test_reached_nodes() {
        let mut graph = create_test_graph();
        graph.add_node(node("E"));

        let tree = distances_from(&graph, &node("A"));
        let reached: Vec<(&str, f64)> = tree.reached().map(|(n, d)| (n.as_str(), d)).collect();

        assert_eq!(reached, vec![("A", 0.0), ("B", 1.0), ("C", 3.0), ("D", 4.0)]);
        assert_eq!(tree.predecessor(&node("A")), None);
        assert_eq!(tree.predecessor(&node("E")), None);
        assert_eq!(tree.distance(&node("Z")), f64::INFINITY);
    }

    #[test]
    fn test_repeated_queries_match() {
        let graph = create_test_graph();

        let first = shortest_path(&graph, &node("D"), &node("A"));
        let second = shortest_path(&graph, &node("D"), &node("A"));

        assert_eq!(first, second);
        assert_eq!(first, Route::Found { path: path(&["D", "C", "B", "A"]), cost: 4.0 });
    }
}
