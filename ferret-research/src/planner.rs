use std::sync::Arc;

use async_trait::async_trait;
use ferret_core::{FerretError, Llm, LlmExt, ResponseSchema};
use ferret_graph::{GraphContext, GraphNode, GraphState, StateUpdate};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{prompts, ResearchConfig, ResearchState, ResearchUpdate};

/// Shape requested from the model.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PlanOutput {
    pub questions: Vec<String>,
}

/// Shapes accepted back: the requested object, or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubQuestions {
    Wrapped(PlanOutput),
    Bare(Vec<String>),
}

impl SubQuestions {
    fn into_questions(self) -> Vec<String> {
        let questions = match self {
            SubQuestions::Wrapped(output) => output.questions,
            SubQuestions::Bare(questions) => questions,
        };
        questions
            .into_iter()
            .map(|question| question.trim().to_string())
            .filter(|question| !question.is_empty())
            .collect()
    }
}

/// Turns the query into sub-questions. Every pass after the first extends the
/// plan from the critic's feedback instead of replacing it.
pub struct PlannerNode {
    llm: Arc<dyn Llm>,
    config: ResearchConfig,
}

impl PlannerNode {
    pub fn new(llm: Arc<dyn Llm>, config: ResearchConfig) -> Self {
        Self { llm, config }
    }
}

#[async_trait]
impl GraphNode<ResearchState> for PlannerNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, FerretError> {
        let state = input.data;
        let follow_up = state.iteration > 0;
        let limit = if follow_up {
            self.config.max_followup_questions
        } else {
            self.config.max_initial_questions
        };
        tracing::info!(iteration = state.iteration + 1, follow_up, "planning");

        let prompt = if follow_up {
            prompts::follow_up_plan(&state.query, &state.critique, &state.missing_aspects, limit)?
        } else {
            prompts::initial_plan(&state.query, limit)?
        };

        // The pass counts even when its output is unusable.
        let mut update = ResearchUpdate {
            iteration: 1,
            ..Default::default()
        };

        let parsed = self
            .llm
            .complete_with_schema::<SubQuestions>(prompt, ResponseSchema::of::<PlanOutput>())
            .await;
        let mut questions = match parsed {
            Ok(parsed) => parsed.into_questions(),
            Err(err) if err.is_parse_failure() => {
                tracing::warn!(error = %err, "plan could not be parsed; keeping the existing plan");
                return Ok(StateUpdate::new(update));
            }
            Err(err) => return Err(err),
        };
        if questions.is_empty() {
            tracing::warn!("planner returned no sub-questions; keeping the existing plan");
            return Ok(StateUpdate::new(update));
        }
        questions.truncate(limit);

        tracing::info!(count = questions.len(), "plan created");
        for (idx, question) in questions.iter().enumerate() {
            tracing::info!("  {}. {}", idx + 1, question);
        }

        if follow_up {
            let mut plan = state.plan;
            plan.extend(questions);
            update.plan = Some(plan);
        } else {
            update.plan = Some(questions);
            update.researched_through = Some(0);
        }
        Ok(StateUpdate::new(update))
    }
}
