use std::path::PathBuf;

use ferret_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("research agent is missing its {0}")]
    MissingComponent(&'static str),
    #[error("invalid research config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
