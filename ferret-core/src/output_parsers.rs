use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{FerretError, LlmResponse, Runnable};

/// Extracts the `content` of an [`LlmResponse`] unchanged.
#[derive(Clone, Default)]
pub struct StrOutputParser;

#[async_trait]
impl Runnable<LlmResponse, String> for StrOutputParser {
    async fn invoke(&self, input: LlmResponse) -> Result<String, FerretError> {
        Ok(input.content)
    }
}

/// Locates the JSON payload inside a model answer.
///
/// Models wrap JSON in a fenced block (with or without a language tag) or
/// surround it with prose. The first fenced block wins; without one, the span
/// from the first opening bracket to the last closing bracket is used.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let body = match after.find('\n') {
            Some(newline)
                if after[..newline]
                    .trim()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric()) =>
            {
                &after[newline + 1..]
            }
            _ => after.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
        let end = body.find("```").unwrap_or(body.len());
        return body[..end].trim();
    }

    let open = trimmed.find(['{', '[']);
    let close = trimmed.rfind(['}', ']']);
    match (open, close) {
        (Some(open), Some(close)) if open < close => &trimmed[open..=close],
        _ => trimmed,
    }
}

/// Parses a model answer into `T`.
///
/// Deserializing into a typed target is the validation step: a payload that
/// does not match the shape of `T` fails with [`FerretError::ParseFailed`].
pub struct StructuredOutputParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> StructuredOutputParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for StructuredOutputParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for StructuredOutputParser<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> StructuredOutputParser<T> {
    pub fn parse(&self, raw: &str) -> Result<T, FerretError> {
        let payload = extract_json(raw);
        if payload.is_empty() {
            return Err(FerretError::ParseFailed {
                output: raw.to_string(),
                reason: "no structured output found in content".to_string(),
            });
        }

        serde_json::from_str(payload).map_err(|err| FerretError::ParseFailed {
            output: raw.to_string(),
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl<T> Runnable<LlmResponse, T> for StructuredOutputParser<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn invoke(&self, input: LlmResponse) -> Result<T, FerretError> {
        self.parse(&input.content)
    }
}
