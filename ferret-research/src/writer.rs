use std::sync::Arc;

use async_trait::async_trait;
use ferret_core::{FerretError, Llm, LlmExt};
use ferret_graph::{GraphContext, GraphNode, GraphState, StateUpdate};
use ferret_tools::truncate_chars;

use crate::{prompts, Note, ResearchState, ResearchUpdate};

/// Synthesizes every note into the final Markdown report.
pub struct WriterNode {
    llm: Arc<dyn Llm>,
    excerpt_char_limit: usize,
}

impl WriterNode {
    pub fn new(llm: Arc<dyn Llm>, excerpt_char_limit: usize) -> Self {
        Self {
            llm,
            excerpt_char_limit,
        }
    }

    fn research_content(&self, notes: &[Note]) -> Result<String, FerretError> {
        let mut content = String::new();
        for (idx, note) in notes.iter().enumerate() {
            content.push_str(&format!(
                "\n## Research Point {}\n**Question:** {}\n**Summary:** {}\n",
                idx + 1,
                note.question,
                note.summary.as_deref().unwrap_or("N/A")
            ));
            if !note.search_results.is_empty() {
                let sources = serde_json::to_string_pretty(&note.search_results)?;
                content.push_str(&format!("**Sources:** {sources}\n"));
            }
            if let Some(scraped) = note.scraped_content.as_deref().filter(|s| !s.is_empty()) {
                content.push_str(&format!(
                    "**Additional Details:** {}...\n",
                    truncate_chars(scraped, self.excerpt_char_limit)
                ));
            }
        }
        Ok(content)
    }
}

#[async_trait]
impl GraphNode<ResearchState> for WriterNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, FerretError> {
        let state = input.data;
        tracing::info!(notes = state.notes.len(), "composing final report");

        let prompt = prompts::report(&state.query, &self.research_content(&state.notes)?)?;
        let report = self.llm.complete(prompt).await?;
        tracing::info!(chars = report.chars().count(), "report completed");

        Ok(StateUpdate::new(ResearchUpdate {
            final_report: Some(report),
            should_continue: Some(false),
            ..Default::default()
        }))
    }
}
