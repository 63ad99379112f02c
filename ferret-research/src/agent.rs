use std::fmt;
use std::sync::Arc;

use ferret_core::Llm;
use ferret_graph::{
    ExecutableGraph, ExecutionConfig, GraphBuilder, GraphError, GraphState, Observer, END,
};
use ferret_tools::{PageFetcher, WebSearch};

use crate::{
    CriticNode, PlannerNode, ResearchConfig, ResearchError, ResearchState, ResearcherNode,
    WriterNode,
};

/// Stages of a run. Each working stage is one graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Planning,
    Researching,
    Critiquing,
    Writing,
    Done,
}

impl Stage {
    pub const fn node(self) -> &'static str {
        match self {
            Stage::Planning => "planner",
            Stage::Researching => "researcher",
            Stage::Critiquing => "critic",
            Stage::Writing => "writer",
            Stage::Done => END,
        }
    }

    pub fn from_node(node: &str) -> Option<Stage> {
        [
            Stage::Planning,
            Stage::Researching,
            Stage::Critiquing,
            Stage::Writing,
            Stage::Done,
        ]
        .into_iter()
        .find(|stage| stage.node() == node)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Planning => "planning",
            Stage::Researching => "researching",
            Stage::Critiquing => "critiquing",
            Stage::Writing => "writing",
            Stage::Done => "done",
        };
        f.write_str(label)
    }
}

/// The loop's only branch: back to planning while the critic asks for more.
pub fn route_after_critique(state: &GraphState<ResearchState>) -> String {
    if state.data.should_continue {
        tracing::info!("looping back to planner for additional research");
        Stage::Planning.node().to_string()
    } else {
        tracing::info!("proceeding to writer");
        Stage::Writing.node().to_string()
    }
}

pub struct ResearchAgent {
    llm: Arc<dyn Llm>,
    search: Arc<dyn WebSearch>,
    fetcher: Arc<dyn PageFetcher>,
    config: ResearchConfig,
    observers: Vec<Arc<dyn Observer>>,
}

impl ResearchAgent {
    pub fn builder() -> ResearchAgentBuilder {
        ResearchAgentBuilder::default()
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    pub fn graph(&self) -> Result<ExecutableGraph<ResearchState>, GraphError> {
        let planner = PlannerNode::new(self.llm.clone(), self.config.clone());
        let researcher = ResearcherNode::new(
            self.llm.clone(),
            self.search.clone(),
            self.fetcher.clone(),
            self.config.clone(),
        );
        let critic = CriticNode::new(self.llm.clone(), self.config.max_iterations);
        let writer = WriterNode::new(self.llm.clone(), self.config.excerpt_char_limit);

        let mut builder = GraphBuilder::new()
            .add_node(Stage::Planning.node(), planner)
            .add_node(Stage::Researching.node(), researcher)
            .add_node(Stage::Critiquing.node(), critic)
            .add_node(Stage::Writing.node(), writer)
            .set_entry(Stage::Planning.node())
            .add_edge(Stage::Planning.node(), Stage::Researching.node())
            .add_edge(Stage::Researching.node(), Stage::Critiquing.node())
            .add_conditional_edge(Stage::Critiquing.node(), route_after_critique)
            .add_edge(Stage::Writing.node(), END)
            .with_config(ExecutionConfig::default().with_max_steps(self.config.max_steps()));
        for observer in &self.observers {
            builder = builder.with_observer(observer.clone());
        }
        builder.build()
    }

    /// Runs the loop to completion and returns the final state.
    pub async fn run(&self, query: &str) -> Result<ResearchState, ResearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResearchError::EmptyQuery);
        }

        let graph = self.graph()?;
        tracing::info!(query, max_iterations = self.config.max_iterations, "research started");
        let state = graph.invoke(GraphState::new(ResearchState::new(query))).await?;
        tracing::info!(
            iterations = state.data.iteration,
            notes = state.data.notes.len(),
            "research completed"
        );
        Ok(state.into_inner())
    }
}

#[derive(Default)]
pub struct ResearchAgentBuilder {
    llm: Option<Arc<dyn Llm>>,
    search: Option<Arc<dyn WebSearch>>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    config: ResearchConfig,
    observers: Vec<Arc<dyn Observer>>,
}

impl ResearchAgentBuilder {
    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn search(mut self, search: Arc<dyn WebSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn config(mut self, config: ResearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> Result<ResearchAgent, ResearchError> {
        self.config.validate()?;
        Ok(ResearchAgent {
            llm: self.llm.ok_or(ResearchError::MissingComponent("llm"))?,
            search: self.search.ok_or(ResearchError::MissingComponent("search"))?,
            fetcher: self.fetcher.ok_or(ResearchError::MissingComponent("fetcher"))?,
            config: self.config,
            observers: self.observers,
        })
    }
}
