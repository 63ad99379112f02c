use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::{
    FerretError, Llm, LlmRequest, ResponseSchema, Runnable, StrOutputParser,
    StructuredOutputParser,
};

/// Convenience calls layered over any [`Llm`].
#[async_trait]
pub trait LlmExt: Llm {
    /// Sends a single user prompt and returns the answer text verbatim.
    async fn complete(&self, prompt: String) -> Result<String, FerretError> {
        let response = self.invoke(LlmRequest::from_prompt(prompt)).await?;
        StrOutputParser.invoke(response).await
    }

    /// Sends a single user prompt with `T`'s JSON Schema attached and parses
    /// the answer into `T`.
    async fn complete_structured<T>(&self, prompt: String) -> Result<T, FerretError>
    where
        T: JsonSchema + DeserializeOwned + Send + 'static,
    {
        self.complete_with_schema(prompt, ResponseSchema::of::<T>())
            .await
    }

    /// Like [`LlmExt::complete_structured`], for targets that accept more
    /// shapes than the schema advertised to the model.
    async fn complete_with_schema<T>(
        &self,
        prompt: String,
        schema: ResponseSchema,
    ) -> Result<T, FerretError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = LlmRequest::from_prompt(prompt).with_schema(schema);
        let response = self.invoke(request).await?;
        StructuredOutputParser::<T>::new().invoke(response).await
    }
}

impl<L: Llm + ?Sized> LlmExt for L {}
