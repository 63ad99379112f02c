use thiserror::Error;

#[derive(Debug, Error)]
pub enum FerretError {
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("Tool call failed for '{tool_name}': {reason}")]
    ToolCallFailed { tool_name: String, reason: String },
    #[error("Parsing failed on output '{output}': {reason}")]
    ParseFailed { output: String, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

impl FerretError {
    /// True for failures caused by the model's output rather than the transport.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, FerretError::ParseFailed { .. } | FerretError::Serde(_))
    }
}
