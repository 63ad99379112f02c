use std::sync::Arc;

use async_trait::async_trait;
use ferret_core::{FerretError, Llm, LlmExt};
use ferret_graph::{GraphContext, GraphNode, GraphState, StateUpdate};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{prompts, Note, ResearchState, ResearchUpdate};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct Verdict {
    pub is_complete: bool,
    pub feedback: String,
    #[serde(default)]
    pub missing_aspects: Vec<String>,
}

/// Judges whether the accumulated notes answer the query.
///
/// An unparseable verdict fails the node, which ends the run.
pub struct CriticNode {
    llm: Arc<dyn Llm>,
    max_iterations: u32,
}

impl CriticNode {
    pub fn new(llm: Arc<dyn Llm>, max_iterations: u32) -> Self {
        Self {
            llm,
            max_iterations,
        }
    }
}

fn digest(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|note| {
            format!(
                "Question: {}\nSummary: {}\nSufficient: {}",
                note.question,
                note.summary.as_deref().unwrap_or("No summary"),
                note.sufficient
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl GraphNode<ResearchState> for CriticNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, FerretError> {
        let state = input.data;
        tracing::info!(
            iteration = state.iteration,
            notes = state.notes.len(),
            "evaluating research quality"
        );

        let prompt = prompts::critique(
            &state.query,
            state.iteration,
            self.max_iterations,
            &digest(&state.notes),
        )?;
        let verdict: Verdict = self.llm.complete_structured(prompt).await?;

        let capped = state.iteration >= self.max_iterations;
        let complete = verdict.is_complete || capped;
        if verdict.is_complete {
            tracing::info!("research quality approved");
        } else if capped {
            tracing::info!(
                feedback = %verdict.feedback,
                "iteration cap of {} reached; stopping research",
                self.max_iterations
            );
        } else {
            tracing::info!(feedback = %verdict.feedback, "research incomplete");
        }

        Ok(StateUpdate::new(ResearchUpdate {
            critique: Some(verdict.feedback),
            missing_aspects: Some(verdict.missing_aspects),
            should_continue: Some(!complete),
            ..Default::default()
        }))
    }
}
