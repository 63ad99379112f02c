use std::sync::Arc;

use async_trait::async_trait;
use ferret_core::{FerretError, Llm, LlmExt};
use ferret_graph::{GraphContext, GraphNode, GraphState, StateUpdate};
use ferret_tools::{truncate_chars, PageFetcher, WebSearch};
use futures::stream::{self, StreamExt};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{prompts, Note, ResearchConfig, ResearchScope, ResearchState, ResearchUpdate};

/// The model's reading of one question's search results.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Analysis {
    pub sufficient: bool,
    pub summary: String,
    #[serde(default)]
    pub needs_scraping: bool,
    #[serde(default)]
    pub url_to_scrape: Option<String>,
}

/// Researches sub-questions and returns one note per question, in plan order.
pub struct ResearcherNode {
    llm: Arc<dyn Llm>,
    search: Arc<dyn WebSearch>,
    fetcher: Arc<dyn PageFetcher>,
    config: ResearchConfig,
}

impl ResearcherNode {
    pub fn new(
        llm: Arc<dyn Llm>,
        search: Arc<dyn WebSearch>,
        fetcher: Arc<dyn PageFetcher>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            llm,
            search,
            fetcher,
            config,
        }
    }

    /// Never fails: errors become a note with `error` set.
    pub async fn research(&self, question: &str) -> Note {
        match self.try_research(question).await {
            Ok(note) => note,
            Err(err) => {
                tracing::warn!(question, error = %err, "research error");
                Note::failed(question, err.to_string())
            }
        }
    }

    async fn research_numbered(&self, question: &str, position: usize, total: usize) -> Note {
        tracing::info!("researching ({}/{}): {}", position, total, question);
        self.research(question).await
    }

    async fn try_research(&self, question: &str) -> Result<Note, FerretError> {
        let mut search_results =
            self.search
                .search(question)
                .await
                .map_err(|err| FerretError::ToolCallFailed {
                    tool_name: "search".to_string(),
                    reason: err.to_string(),
                })?;
        search_results.truncate(self.config.max_search_results);

        let rendered = serde_json::to_string_pretty(&search_results)?;
        let prompt = prompts::analysis(question, &rendered)?;
        let analysis: Analysis = self.llm.complete_structured(prompt).await?;

        let scraped_content = match analysis.url_to_scrape.as_deref().map(str::trim) {
            Some(url) if analysis.needs_scraping && !url.is_empty() => self.scrape(url).await,
            _ => None,
        };

        tracing::info!(
            question,
            sufficient = analysis.sufficient,
            "summary: {}",
            truncate_chars(&analysis.summary, 100)
        );
        Ok(Note {
            question: question.to_string(),
            search_results,
            summary: Some(analysis.summary),
            sufficient: analysis.sufficient,
            scraped_content,
            error: None,
        })
    }

    async fn scrape(&self, url: &str) -> Option<String> {
        tracing::info!(url, "scraping");
        match self.fetcher.fetch(url).await {
            Ok(text) => Some(truncate_chars(&text, self.config.scrape_char_limit).to_string()),
            Err(err) => {
                tracing::warn!(url, error = %err, "scraping failed");
                None
            }
        }
    }
}

#[async_trait]
impl GraphNode<ResearchState> for ResearcherNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, FerretError> {
        let state = input.data;
        let start = match self.config.scope {
            ResearchScope::FullPlan => 0,
            ResearchScope::Pending => state.researched_through.min(state.plan.len()),
        };
        let questions = &state.plan[start..];
        let total = questions.len();
        tracing::info!(total, "gathering information");

        let pending: Vec<_> = questions
            .iter()
            .enumerate()
            .map(|(idx, question)| self.research_numbered(question, idx + 1, total))
            .collect();
        let notes: Vec<Note> = stream::iter(pending)
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        Ok(StateUpdate::new(ResearchUpdate {
            notes,
            researched_through: Some(state.plan.len()),
            ..Default::default()
        }))
    }
}
