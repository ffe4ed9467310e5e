//! Build a [`Graph`] from a JSON network description.
//!
//! The description is a list of records, one per node:
//!
//! ```json
//! [
//!   {"name": "Factory", "kind": "Factory", "coordinates": [19.30, -99.15], "neighbors": ["Warehouse"], "costs": [10.0]},
//!   {"name": "Warehouse", "neighbors": [], "costs": []}
//! ]
//! ```
//!
//! `neighbors` and `costs` are parallel lists: the i-th cost belongs to the
//! edge towards the i-th neighbor. Edges are directed as listed.
//! `kind` (also accepted as `type`) and `coordinates` are optional.

use crate::errors::LoaderError;
use crate::geometry::Point;
use super::Graph;

use std::{fs, path::Path};
use serde::{Deserialize, Serialize};


/// One node of the network description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Point>,
    #[serde(default)]
    pub neighbors: Vec<String>,
    #[serde(default)]
    pub costs: Vec<f64>,
}


/// Read and parse a network description file
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph<String>, LoaderError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let graph = parse_graph(&contents)?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Parse a network description held in memory
pub fn parse_graph(json: &str) -> Result<Graph<String>, LoaderError> {
    let records: Vec<NodeRecord> = serde_json::from_str(json)?;
    from_records(records)
}

/// Validate the records and turn them into a graph
///
/// Every node is registered before any edge, so node order follows the
/// record order and neighbors may refer to records further down the list.
pub fn from_records(records: Vec<NodeRecord>) -> Result<Graph<String>, LoaderError> {
    let mut graph = Graph::with_capacity(records.len());

    for record in &records {
        if !graph.add_node(record.name.clone()) {
            return Err(LoaderError::DuplicateNode(record.name.clone()));
        }
        if let Some(position) = record.coordinates.filter(Point::is_finite) {
            graph.add_node_at(record.name.clone(), position);
        }
        if let Some(kind) = &record.kind {
            graph.set_kind(record.name.clone(), kind.clone());
        }
    }

    for record in records {
        if record.neighbors.len() != record.costs.len() {
            return Err(LoaderError::CostMismatch {
                node: record.name,
                neighbors: record.neighbors.len(),
                costs: record.costs.len(),
            });
        }

        for (neighbor, cost) in record.neighbors.into_iter().zip(record.costs) {
            if !graph.contains(&neighbor) {
                return Err(LoaderError::UnknownNeighbor { node: record.name, neighbor });
            }
            if !cost.is_finite() || cost < 0.0 {
                return Err(LoaderError::InvalidCost { node: record.name, neighbor, cost });
            }
            graph.add_edge(record.name.clone(), neighbor, cost);
        }
    }

    Ok(graph)
}
