mod config;
mod error;
mod graph;
mod observer;
pub mod reducer;
mod state;

pub use config::ExecutionConfig;
pub use error::GraphError;
pub use graph::{ExecutableGraph, GraphBuilder, GraphContext, GraphNode, END};
pub use observer::{Observer, TracingObserver};
pub use reducer::{AddCounter, Append, Overwrite, Reducer};
pub use state::{GraphState, StateSchema, StateUpdate};
