use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ToolError;

pub const DEFAULT_MAX_RESULTS: usize = 3;
const TAVILY_BASE_URL: &str = "https://api.tavily.com";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError>;
}

/// Search backed by the Tavily API.
#[derive(Clone)]
pub struct TavilySearch {
    http: Client,
    base_url: String,
    api_key: SecretString,
    max_results: usize,
}

impl fmt::Debug for TavilySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TavilySearch")
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TavilySearch {
    pub fn new(api_key: SecretString) -> Result<Self, ToolError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(ToolError::InvalidInput("tavily api key is empty".to_string()));
        }
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: TAVILY_BASE_URL.to_string(),
            api_key,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::InvalidInput("search query is empty".to_string()));
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&TavilyRequest {
                query,
                max_results: self.max_results,
                search_depth: "basic",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Http(format!("tavily returned {status}: {body}")));
        }

        let mut results = response.json::<TavilyResponse>().await?.results;
        results.truncate(self.max_results);
        tracing::debug!(query, hits = results.len(), "tavily search");
        Ok(results)
    }
}
