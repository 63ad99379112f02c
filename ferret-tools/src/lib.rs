//! Web search and page fetching used by the research stage.

mod error;
mod fetch;
mod search;
mod text;

pub use error::ToolError;
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use search::{SearchResult, TavilySearch, WebSearch, DEFAULT_MAX_RESULTS};
pub use text::{html_to_text, truncate_chars};
