use crate::collections::FxIndexSet;
use crate::errors::RouteFinderError;
use crate::graph::Graph;

use std::{fmt::{Debug, Display, Write as _}, fs, hash::Hash, path::Path};


/// Graphviz rendering options
#[derive(Clone, Debug)]
pub struct DotOptions {
    pub name: String,
    pub label_weights: bool,
    pub highlight_color: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            name: "network".to_string(),
            label_weights: true,
            highlight_color: "red".to_string(),
        }
    }
}


/// Render the graph as a Graphviz digraph
/// Nodes and edges on `route` are drawn bold in the highlight color,
/// positioned nodes are pinned with `pos` (use `neato -n` to honour them)
pub fn to_dot<N>(graph: &Graph<N>, route: Option<&[N]>, options: &DotOptions) -> String
where
    N: Eq + Hash + Clone + Debug + Display,
    {

    let route = route.unwrap_or(&[]);
    let route_nodes: FxIndexSet<&N> = route.iter().collect();
    let route_edges: FxIndexSet<(&N, &N)> = route.windows(2).map(|hop| (&hop[0], &hop[1])).collect();

    // Writing into a String cannot fail
    let mut dot = String::new();
    let _ = writeln!(dot, "digraph {} {{", quote(&options.name));

    for node in graph.nodes() {
        let mut attributes = Vec::new();
        if let Some(position) = graph.position(node) {
            // x holds latitude: draw longitude across, latitude up
            attributes.push(format!("pos=\"{},{}!\"", position.y, position.x));
        }
        if let Some(kind) = graph.kind(node) {
            attributes.push(format!("class={}", quote(kind)));
        }
        if route_nodes.contains(node) {
            attributes.push(format!("color={}", quote(&options.highlight_color)));
            attributes.push("penwidth=2".to_string());
        }
        let _ = writeln!(dot, "    {}{};", quote(&node.to_string()), attribute_list(&attributes));
    }

    for (from, to, weight) in graph.edges() {
        let mut attributes = Vec::new();
        if options.label_weights {
            attributes.push(format!("label=\"{weight}\""));
        }
        if route_edges.contains(&(from, to)) {
            attributes.push(format!("color={}", quote(&options.highlight_color)));
            attributes.push("penwidth=2".to_string());
        }
        let _ = writeln!(
            dot,
            "    {} -> {}{};",
            quote(&from.to_string()),
            quote(&to.to_string()),
            attribute_list(&attributes)
        );
    }

    dot.push_str("}\n");
    dot
}

/// Render and write to a file
pub fn write_dot<N>(path: impl AsRef<Path>, graph: &Graph<N>, route: Option<&[N]>, options: &DotOptions) -> Result<(), RouteFinderError>
where
    N: Eq + Hash + Clone + Debug + Display,
    {

    let path = path.as_ref();
    fs::write(path, to_dot(graph, route, options)).map_err(|source| RouteFinderError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote dot file");
    Ok(())
}


/// Plain text listing of the network, nodes first then edges
///
/// ```text
/// Nodes (2):
///   Factory1 [Factory] at (19.3, -99.15)
///   Warehouse1
/// Edges (1):
///   Factory1 -> Warehouse1: 10
/// ```
pub fn to_summary<N>(graph: &Graph<N>) -> String
where
    N: Eq + Hash + Clone + Debug + Display,
    {

    let mut summary = String::new();
    let _ = writeln!(summary, "Nodes ({}):", graph.len());
    for node in graph.nodes() {
        let _ = write!(summary, "  {node}");
        if let Some(kind) = graph.kind(node) {
            let _ = write!(summary, " [{kind}]");
        }
        if let Some(position) = graph.position(node) {
            let _ = write!(summary, " at ({}, {})", position.x, position.y);
        }
        summary.push('\n');
    }

    let _ = writeln!(summary, "Edges ({}):", graph.edge_count());
    for (from, to, weight) in graph.edges() {
        let _ = writeln!(summary, "  {from} -> {to}: {weight}");
    }
    summary
}


/// DOT quoted identifier
fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn attribute_list(attributes: &[String]) -> String {
    if attributes.is_empty() {
        String::new()
    } else {
        format!(" [{}]", attributes.join(", "))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn graph() -> Graph<String> {
        let mut graph = Graph::new();
        graph.add_node_at("A".to_string(), Point::new(19.5, -99.25));
        graph.add_edge("A".to_string(), "B".to_string(), 1.0);
        graph.add_edge("B".to_string(), "C".to_string(), 2.5);
        graph.add_edge("A".to_string(), "C".to_string(), 4.0);
        graph
    }

    #[test]
    fn test_plain_graph() {
        let dot = to_dot(&graph(), None, &DotOptions::default());

        assert!(dot.starts_with("digraph \"network\" {\n"));
        assert!(dot.contains("    \"A\" [pos=\"-99.25,19.5!\"];\n"));
        assert!(dot.contains("    \"B\";\n"));
        assert!(dot.contains("    \"B\" -> \"C\" [label=\"2.5\"];\n"));
        assert!(dot.ends_with("}\n"));
        assert!(!dot.contains("penwidth"));
    }

    #[test]
    fn test_route_is_highlighted() {
        let route = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let options = DotOptions { label_weights: false, ..DotOptions::default() };
        let dot = to_dot(&graph(), Some(&route), &options);

        assert!(dot.contains("    \"A\" -> \"B\" [color=\"red\", penwidth=2];\n"));
        assert!(dot.contains("    \"B\" -> \"C\" [color=\"red\", penwidth=2];\n"));
        // the direct edge is not on the route
        assert!(dot.contains("    \"A\" -> \"C\";\n"));
        assert!(dot.contains("    \"C\" [color=\"red\", penwidth=2];\n"));
    }

    #[test]
    fn test_kind_becomes_class() {
        let mut graph = graph();
        graph.set_kind("B".to_string(), "Warehouse");
        let dot = to_dot(&graph, None, &DotOptions::default());
        assert!(dot.contains("    \"B\" [class=\"Warehouse\"];\n"));
    }

    #[test]
    fn test_summary() {
        let mut graph = graph();
        graph.set_kind("A".to_string(), "Factory");

        assert_eq!(
            to_summary(&graph),
            "Nodes (3):\n  A [Factory] at (19.5, -99.25)\n  B\n  C\n\
             Edges (3):\n  A -> B: 1\n  A -> C: 4\n  B -> C: 2.5\n"
        );
    }

    #[test]
    fn test_names_are_escaped() {
        let mut graph: Graph<String> = Graph::new();
        graph.add_node("Estadio \"Azteca\"".to_string());
        let dot = to_dot(&graph, None, &DotOptions::default());
        assert!(dot.contains("\"Estadio \\\"Azteca\\\"\";"));
    }

    #[test]
    fn test_write_dot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.dot");

        write_dot(&path, &graph(), None, &DotOptions::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_dot(&graph(), None, &DotOptions::default()));

        let missing = dir.path().join("missing").join("network.dot");
        assert!(matches!(
            write_dot(&missing, &graph(), None, &DotOptions::default()),
            Err(RouteFinderError::Output { .. })
        ));
    }
}
