use ferret_core::FerretError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph has no entry node")]
    MissingEntry,
    #[error("missing node: {node}")]
    MissingNode { node: String },
    #[error("invalid edge to '{node}'")]
    InvalidEdge { node: String },
    #[error("node '{node}' failed: {source}")]
    NodeFailed {
        node: String,
        #[source]
        source: FerretError,
    },
    #[error("Max steps exceeded: reached {reached}, limit {max}")]
    MaxStepsExceeded { max: usize, reached: usize },
}
