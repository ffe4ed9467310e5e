use std::path::PathBuf;
use thiserror::Error;


/// Failures while turning a serialized network description into a `Graph`
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node '{0}' is defined more than once")]
    DuplicateNode(String), // names must be unique

    #[error("node '{node}' lists {neighbors} neighbors but {costs} costs")]
    CostMismatch {
        node: String,
        neighbors: usize,
        costs: usize,
    },

    #[error("node '{node}' links to unknown node '{neighbor}'")]
    UnknownNeighbor { node: String, neighbor: String },

    #[error("edge '{node}' -> '{neighbor}' has invalid cost {cost}")]
    InvalidCost {
        node: String,
        neighbor: String,
        cost: f64,
    },
}


/// Failures from graph queries that are not routing outcomes
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("spatial index error: {0}")]
    KdTree(String),
}

impl From<kdtree::ErrorKind> for GraphError {
    fn from(error: kdtree::ErrorKind) -> Self {
        GraphError::KdTree(error.to_string())
    }
}


/// Top level error for the command line front end
#[derive(Debug, Error)]
pub enum RouteFinderError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
