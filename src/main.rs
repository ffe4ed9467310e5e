use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use routefinder::{
    all_pairs, load_graph, logging, render, shortest_path, Graph, Point, Route, RouteFinderError,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Network description (JSON list of node records)
    #[arg(short, long)]
    graph: PathBuf,

    /// Start node name, or `@x,y` for the node closest to a coordinate
    #[arg(short, long, requires = "to")]
    from: Option<String>,

    /// End node name, or `@x,y` for the node closest to a coordinate
    #[arg(short, long, requires = "from")]
    to: Option<String>,

    /// Write the network as a Graphviz file, with the route highlighted
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Print the cost between every pair of nodes
    #[arg(long)]
    all_pairs: bool,

    /// List nodes (with kind and position) and edges; the default when no
    /// route, report or rendering is asked for
    #[arg(long)]
    summary: bool,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log filter, e.g. `debug` or `routefinder=trace`
    #[arg(long, env = "ROUTEFINDER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = logging::init_tracing(args.verbose, args.log_level.as_deref(), args.log_json) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "routefinder failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), RouteFinderError> {
    let graph = load_graph(&args.graph)?;

    let no_action = args.from.is_none() && !args.all_pairs && args.dot.is_none();
    if args.summary || no_action {
        print!("{}", render::to_summary(&graph));
    }

    let route = match (&args.from, &args.to) {
        (Some(from), Some(to)) => {
            let start = resolve_node(&graph, from)?;
            let end = resolve_node(&graph, to)?;
            let route = shortest_path(&graph, &start, &end);
            print_route(&start, &end, &route, args.json);
            Some(route)
        }
        _ => None,
    };

    if args.all_pairs {
        print!("{}", all_pairs(&graph));
    }

    if let Some(path) = &args.dot {
        let highlighted = route.as_ref().and_then(Route::path);
        render::write_dot(path, &graph, highlighted, &render::DotOptions::default())?;
    }

    Ok(())
}

/// Node names are taken as is; `@x,y` picks the closest positioned node
fn resolve_node(graph: &Graph<String>, arg: &str) -> Result<String, RouteFinderError> {
    let Some(point) = arg.strip_prefix('@').and_then(parse_point) else {
        return Ok(arg.to_string());
    };

    match graph.nearest_node(&point)? {
        Some(node) => {
            let offset = graph.position(node).map(|position| position.distance(&point));
            tracing::debug!(x = point.x, y = point.y, %node, ?offset, "resolved coordinate");
            Ok(node.clone())
        }
        // nothing is positioned, the name will not match and the route is empty
        None => Ok(arg.to_string()),
    }
}

fn parse_point(text: &str) -> Option<Point> {
    let (x, y) = text.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn print_route(start: &str, end: &str, route: &Route<String>, json: bool) {
    if json {
        match serde_json::to_string(route) {
            Ok(line) => println!("{line}"),
            Err(error) => tracing::error!(%error, "failed to serialize route"),
        }
        return;
    }

    match route {
        Route::Found { path, cost } => println!("Route: {} (cost {cost})", path.join(" -> ")),
        Route::NoPath => println!("No route from {start} to {end}"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("19.3, -99.15"), Some(Point::new(19.3, -99.15)));
        assert_eq!(parse_point("19.3"), None);
        assert_eq!(parse_point("a,b"), None);
    }

    #[test]
    fn test_resolve_node() {
        let mut graph: Graph<String> = Graph::new();
        graph.add_node_at("Azteca".to_string(), Point::new(19.3029, -99.1506));
        graph.add_node_at("BBVA".to_string(), Point::new(25.6687, -100.3116));

        assert_eq!(resolve_node(&graph, "@25.0,-100.0").unwrap(), "BBVA");
        assert_eq!(resolve_node(&graph, "Azteca").unwrap(), "Azteca");
        assert_eq!(resolve_node(&graph, "@bad").unwrap(), "@bad");
    }

    #[test]
    fn test_args_require_both_ends() {
        assert!(Args::try_parse_from(["routefinder", "-g", "net.json", "--from", "A"]).is_err());
        let args = Args::try_parse_from(["routefinder", "-g", "net.json", "-f", "A", "-t", "D"]).unwrap();
        assert_eq!(args.from.as_deref(), Some("A"));
        assert_eq!(args.to.as_deref(), Some("D"));
    }
}
