use std::collections::HashMap;
use std::sync::Arc;

use ferret_core::FerretError;

use crate::{ExecutionConfig, GraphError, GraphState, Observer, StateSchema, StateUpdate};

/// Routing target that terminates a run.
pub const END: &str = "__end__";

#[derive(Clone, Debug)]
pub struct GraphContext {
    pub node: String,
    /// 1-based count of node executions so far, including this one.
    pub step: usize,
}

#[async_trait::async_trait]
pub trait GraphNode<S: StateSchema>: Send + Sync {
    async fn invoke_with_context(
        &self,
        input: GraphState<S>,
        context: &GraphContext,
    ) -> Result<StateUpdate<S>, FerretError>;
}

type Router<S> = Box<dyn Fn(&GraphState<S>) -> String + Send + Sync>;

enum Edge<S: StateSchema> {
    Static(String),
    Conditional(Router<S>),
}

pub struct GraphBuilder<S: StateSchema> {
    nodes: HashMap<String, Box<dyn GraphNode<S>>>,
    edges: HashMap<String, Edge<S>>,
    entry: Option<String>,
    config: ExecutionConfig,
    observers: Vec<Arc<dyn Observer>>,
}

impl<S: StateSchema> Default for GraphBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateSchema> GraphBuilder<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry: None,
            config: ExecutionConfig::default(),
            observers: Vec::new(),
        }
    }

    pub fn add_node<N>(mut self, name: &str, node: N) -> Self
    where
        N: GraphNode<S> + 'static,
    {
        self.nodes.insert(name.to_string(), Box::new(node));
        self
    }

    pub fn set_entry(mut self, name: &str) -> Self {
        self.entry = Some(name.to_string());
        self
    }

    /// Unconditional edge. A later edge from the same node replaces this one.
    pub fn add_edge(mut self, from: &str, to: &str) -> Self {
        self.edges
            .insert(from.to_string(), Edge::Static(to.to_string()));
        self
    }

    /// Edge whose target is chosen from the state after `from` has run.
    pub fn add_conditional_edge<F>(mut self, from: &str, router: F) -> Self
    where
        F: Fn(&GraphState<S>) -> String + Send + Sync + 'static,
    {
        self.edges
            .insert(from.to_string(), Edge::Conditional(Box::new(router)));
        self
    }

    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> Result<ExecutableGraph<S>, GraphError> {
        let entry = self.entry.ok_or(GraphError::MissingEntry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(GraphError::MissingNode { node: entry });
        }

        for (from, edge) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(GraphError::MissingNode { node: from.clone() });
            }
            if let Edge::Static(to) = edge {
                if to != END && !self.nodes.contains_key(to) {
                    return Err(GraphError::InvalidEdge { node: to.clone() });
                }
            }
        }

        Ok(ExecutableGraph {
            nodes: self.nodes,
            edges: self.edges,
            entry,
            config: self.config,
            observers: self.observers,
        })
    }
}

pub struct ExecutableGraph<S: StateSchema> {
    nodes: HashMap<String, Box<dyn GraphNode<S>>>,
    edges: HashMap<String, Edge<S>>,
    entry: String,
    config: ExecutionConfig,
    observers: Vec<Arc<dyn Observer>>,
}

impl<S: StateSchema> ExecutableGraph<S> {
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn node_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Runs from the entry node until a route reaches [`END`] or a node has no
    /// outgoing edge.
    pub async fn invoke(&self, mut state: GraphState<S>) -> Result<GraphState<S>, GraphError> {
        let mut current = self.entry.clone();
        let mut step = 0;

        while current != END {
            if let Some(max) = self.config.max_steps {
                if step >= max {
                    return Err(GraphError::MaxStepsExceeded { max, reached: step });
                }
            }
            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| GraphError::MissingNode {
                    node: current.clone(),
                })?;

            step += 1;
            let context = GraphContext {
                node: current.clone(),
                step,
            };
            for observer in &self.observers {
                observer.on_node_enter(&current, step);
            }

            let update = match node.invoke_with_context(state.clone(), &context).await {
                Ok(update) => update,
                Err(error) => {
                    for observer in &self.observers {
                        observer.on_error(&current, &error.to_string());
                    }
                    return Err(GraphError::NodeFailed {
                        node: current,
                        source: error,
                    });
                }
            };
            state = state.apply_update(update);
            tracing::trace!(
                node = %current,
                step,
                state = %state.data.trace_repr(),
                "state updated"
            );

            for observer in &self.observers {
                observer.on_node_exit(&current, step);
            }

            let next = match self.edges.get(&current) {
                Some(Edge::Static(to)) => to.clone(),
                Some(Edge::Conditional(router)) => router(&state),
                None => END.to_string(),
            };
            if next != END && !self.nodes.contains_key(&next) {
                return Err(GraphError::InvalidEdge { node: next });
            }
            for observer in &self.observers {
                observer.on_route(&current, &next);
            }
            current = next;
        }

        Ok(state)
    }
}
