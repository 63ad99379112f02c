use ferret_core::FerretError;
use ferret_graph::{
    AddCounter, Append, GraphBuilder, GraphContext, GraphNode, GraphState, Reducer, StateSchema,
    StateUpdate, END,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct LoopState {
    count: u32,
    visited: Vec<String>,
}

#[derive(Clone, Default, Debug)]
struct LoopUpdate {
    count: u32,
    visited: Vec<String>,
}

impl StateSchema for LoopState {
    type Update = LoopUpdate;

    fn apply(current: &Self, update: LoopUpdate) -> Self {
        LoopState {
            count: AddCounter.reduce(current.count, update.count),
            visited: Append.reduce(current.visited.clone(), update.visited),
        }
    }
}

struct Visit;

#[async_trait::async_trait]
impl GraphNode<LoopState> for Visit {
    async fn invoke_with_context(
        &self,
        _input: GraphState<LoopState>,
        context: &GraphContext,
    ) -> Result<StateUpdate<LoopState>, FerretError> {
        Ok(StateUpdate::new(LoopUpdate {
            count: 1,
            visited: vec![context.node.clone()],
        }))
    }
}

#[tokio::test]
async fn conditional_edge_loops_until_router_exits() {
    let graph = GraphBuilder::new()
        .add_node("work", Visit)
        .add_node("check", Visit)
        .add_node("finish", Visit)
        .set_entry("work")
        .add_edge("work", "check")
        .add_conditional_edge("check", |state: &GraphState<LoopState>| {
            if state.data.count >= 6 {
                "finish".to_string()
            } else {
                "work".to_string()
            }
        })
        .add_edge("finish", END)
        .build()
        .expect("graph");

    let out = graph
        .invoke(GraphState::new(LoopState::default()))
        .await
        .expect("run");
    assert_eq!(
        out.data.visited,
        vec!["work", "check", "work", "check", "work", "check", "finish"]
    );
    assert_eq!(out.data.count, 7);
}

#[tokio::test]
async fn node_without_edge_ends_the_run() {
    let graph = GraphBuilder::new()
        .add_node("only", Visit)
        .set_entry("only")
        .build()
        .expect("graph");

    let out = graph
        .invoke(GraphState::new(LoopState::default()))
        .await
        .expect("run");
    assert_eq!(out.data.visited, vec!["only"]);
}

#[tokio::test]
async fn router_naming_unknown_node_is_invalid_edge() {
    let graph = GraphBuilder::new()
        .add_node("a", Visit)
        .set_entry("a")
        .add_conditional_edge("a", |_: &GraphState<LoopState>| "nowhere".to_string())
        .build()
        .expect("graph");

    let err = graph
        .invoke(GraphState::new(LoopState::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, ferret_graph::GraphError::InvalidEdge { node } if node == "nowhere"));
}
