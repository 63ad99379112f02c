#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ferret_core::{FerretError, Llm, LlmRequest, LlmResponse, Runnable};
use ferret_graph::Observer;
use ferret_research::{ResearchAgent, ResearchConfig};
use ferret_tools::{PageFetcher, SearchResult, ToolError, WebSearch};

pub const QUERY: &str = "Latest advancements in solid-state batteries in 2024";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Plan,
    Analysis,
    Critique,
    Report,
}

impl PromptKind {
    fn of(prompt: &str) -> PromptKind {
        if prompt.starts_with("You are a research planner") {
            PromptKind::Plan
        } else if prompt.starts_with("Analyze these search results") {
            PromptKind::Analysis
        } else if prompt.starts_with("You are a research quality critic") {
            PromptKind::Critique
        } else {
            PromptKind::Report
        }
    }
}

/// Answers each kind of prompt from its own script. The last scripted answer
/// repeats once the others are used up.
#[derive(Default)]
pub struct ScriptedLlm {
    scripts: Mutex<HashMap<PromptKind, VecDeque<Result<String, String>>>>,
    prompts: Mutex<Vec<(PromptKind, String)>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, kind: PromptKind, answer: impl Into<String>) -> Self {
        self.push(kind, Ok(answer.into()))
    }

    pub fn fail(self, kind: PromptKind, reason: impl Into<String>) -> Self {
        self.push(kind, Err(reason.into()))
    }

    fn push(self, kind: PromptKind, entry: Result<String, String>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push_back(entry);
        self
    }

    pub fn prompts(&self, kind: PromptKind) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }

    pub fn calls(&self, kind: PromptKind) -> usize {
        self.prompts(kind).len()
    }
}

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for ScriptedLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, FerretError> {
        let prompt = input
            .messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default();
        let kind = PromptKind::of(&prompt);
        self.prompts.lock().unwrap().push((kind, prompt));

        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts
            .get_mut(&kind)
            .ok_or_else(|| FerretError::LlmProvider(format!("no script for {kind:?}")))?;
        let entry = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        match entry {
            Some(Ok(content)) => Ok(LlmResponse { content }),
            Some(Err(reason)) => Err(FerretError::LlmProvider(reason)),
            None => Err(FerretError::LlmProvider(format!("empty script for {kind:?}"))),
        }
    }
}

pub fn plan_json(questions: &[&str]) -> String {
    serde_json::json!({ "questions": questions }).to_string()
}

pub fn analysis_json(sufficient: bool, summary: &str, scrape_url: Option<&str>) -> String {
    serde_json::json!({
        "sufficient": sufficient,
        "summary": summary,
        "needs_scraping": scrape_url.is_some(),
        "url_to_scrape": scrape_url,
    })
    .to_string()
}

pub fn verdict_json(is_complete: bool, feedback: &str, missing: &[&str]) -> String {
    format!(
        "```json\n{}\n```",
        serde_json::json!({
            "is_complete": is_complete,
            "feedback": feedback,
            "missing_aspects": missing,
        })
    )
}

pub const REPORT: &str = "# Solid-State Batteries in 2024\n\n\
## Executive Summary\nProgress accelerated.\n\n\
## Key Findings\n- Sulfide electrolytes matured.\n\n\
## Detailed Analysis\nPilot lines scaled up.\n\n\
## Citations\n- https://a.example/solid-state\n\n\
## Conclusion\nCommercial cells are close.\n";

/// Returns three results per query, or an error for configured questions.
#[derive(Default)]
pub struct FakeSearch {
    failing: Vec<String>,
    delays: HashMap<String, Duration>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, question: &str) -> Self {
        self.failing.push(question.to_string());
        self
    }

    pub fn delayed(mut self, question: &str, delay: Duration) -> Self {
        self.delays.insert(question.to_string(), delay);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.iter().any(|q| q == query) {
            return Err(ToolError::Http("search backend unavailable".to_string()));
        }
        Ok((1..=3)
            .map(|n| SearchResult {
                title: format!("{query} #{n}"),
                url: format!("https://example.com/{n}"),
                content: format!("snippet {n} for {query}"),
                score: Some(1.0 / n as f64),
            })
            .collect())
    }
}

pub struct FakeFetcher {
    page: Result<String, String>,
    pub urls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn serving(page: impl Into<String>) -> Self {
        Self {
            page: Ok(page.into()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            page: Err("connection reset".to_string()),
            urls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ToolError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.page.clone().map_err(ToolError::Http)
    }
}

/// Records the order nodes are entered in.
#[derive(Default)]
pub struct StageRecorder {
    pub nodes: Mutex<Vec<String>>,
}

impl StageRecorder {
    pub fn nodes(&self) -> Vec<String> {
        self.nodes.lock().unwrap().clone()
    }
}

impl Observer for StageRecorder {
    fn on_node_enter(&self, node: &str, _step: usize) {
        self.nodes.lock().unwrap().push(node.to_string());
    }
}

pub struct Harness {
    pub llm: Arc<ScriptedLlm>,
    pub search: Arc<FakeSearch>,
    pub fetcher: Arc<FakeFetcher>,
    pub recorder: Arc<StageRecorder>,
    pub agent: ResearchAgent,
}

pub fn harness(
    llm: ScriptedLlm,
    search: FakeSearch,
    fetcher: FakeFetcher,
    config: ResearchConfig,
) -> Harness {
    let llm = Arc::new(llm);
    let search = Arc::new(search);
    let fetcher = Arc::new(fetcher);
    let recorder = Arc::new(StageRecorder::default());
    let agent = ResearchAgent::builder()
        .llm(llm.clone() as Arc<dyn Llm>)
        .search(search.clone())
        .fetcher(fetcher.clone())
        .observer(recorder.clone())
        .config(config)
        .build()
        .expect("agent");
    Harness {
        llm,
        search,
        fetcher,
        recorder,
        agent,
    }
}
