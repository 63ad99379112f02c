mod ollama;
pub mod openai_compatible;

pub use ferret_core::{Llm, LlmRequest, LlmResponse, Message, ResponseSchema, Role};
pub use ollama::OllamaClient;
pub use openai_compatible::{
    OpenAiCompatibleBuilder, OpenAiCompatibleClient, GEMINI_BASE_URL, OPENAI_BASE_URL,
};
