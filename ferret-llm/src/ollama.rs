use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use ferret_core::{FerretError, Runnable, Value};

use crate::{LlmRequest, LlmResponse, Message};

#[derive(Clone, Debug)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: Client,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Result<Self, FerretError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|err| FerretError::LlmProvider(err.to_string()))?;
        Ok(Self {
            base_url,
            model,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    /// JSON Schema for constrained decoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Value>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[async_trait::async_trait]
impl Runnable<LlmRequest, LlmResponse> for OllamaClient {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, FerretError> {
        let LlmRequest {
            model,
            messages,
            response_schema,
        } = input;
        let model = if model.is_empty() {
            self.model.clone()
        } else {
            model
        };
        let request = OllamaChatRequest {
            model,
            messages,
            format: response_schema.map(|schema| schema.schema),
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        tracing::debug!(url = %url, model = %request.model, "ollama chat request");
        let response: OllamaChatResponse = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| FerretError::LlmProvider(err.to_string()))?
            .error_for_status()
            .map_err(|err| FerretError::LlmProvider(err.to_string()))?
            .json()
            .await
            .map_err(|err| FerretError::LlmProvider(err.to_string()))?;

        Ok(LlmResponse {
            content: response.message.content,
        })
    }
}
