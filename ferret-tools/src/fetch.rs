use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Url};

use crate::{html_to_text, ToolError};

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the readable text of the page at `url`.
    async fn fetch(&self, url: &str) -> Result<String, ToolError>;
}

#[derive(Clone, Debug)]
pub struct HttpPageFetcher {
    http: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self, ToolError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent(concat!("ferret/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ToolError> {
        let parsed =
            Url::parse(url).map_err(|err| ToolError::InvalidInput(format!("{url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ToolError::InvalidInput(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let response = self.http.get(parsed).send().await?.error_for_status()?;
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(true, |value| value.contains("html"));
        let body = response.text().await?;

        if is_html {
            Ok(html_to_text(&body))
        } else {
            Ok(body)
        }
    }
}
