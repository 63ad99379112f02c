mod error;
mod llm;
mod output_parsers;
mod runnable;
mod structured;
mod value;

pub use error::FerretError;
pub use llm::{Llm, LlmRequest, LlmResponse, Message, ResponseSchema, Role};
pub use output_parsers::{extract_json, StrOutputParser, StructuredOutputParser};
pub use runnable::Runnable;
pub use structured::LlmExt;
pub use value::Value;
