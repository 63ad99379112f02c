use std::sync::Mutex;

use async_trait::async_trait;
use ferret_core::{FerretError, LlmExt, LlmRequest, LlmResponse, Role, Runnable};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
struct Plan {
    questions: Vec<String>,
}

struct RecordingLlm {
    answer: String,
    seen: Mutex<Vec<LlmRequest>>,
}

impl RecordingLlm {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for RecordingLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, FerretError> {
        self.seen.lock().unwrap().push(input);
        Ok(LlmResponse {
            content: self.answer.clone(),
        })
    }
}

#[tokio::test]
async fn complete_sends_single_user_message() {
    let llm = RecordingLlm::new("plain text");
    let answer = llm.complete("hello".to_string()).await.unwrap();
    assert_eq!(answer, "plain text");

    let seen = llm.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].messages.len(), 1);
    assert_eq!(seen[0].messages[0].role, Role::User);
    assert_eq!(seen[0].messages[0].content, "hello");
    assert!(seen[0].response_schema.is_none());
}

#[tokio::test]
async fn complete_structured_attaches_schema_and_parses() {
    let llm = RecordingLlm::new("```json\n{\"questions\": [\"a\", \"b\"]}\n```");
    let plan: Plan = llm.complete_structured("plan".to_string()).await.unwrap();
    assert_eq!(plan.questions, vec!["a", "b"]);

    let seen = llm.seen.lock().unwrap();
    let schema = seen[0].response_schema.as_ref().expect("schema attached");
    assert_eq!(schema.name, "Plan");
    assert!(schema.schema["properties"]["questions"].is_object());
}

#[tokio::test]
async fn complete_structured_reports_parse_failures() {
    let llm = RecordingLlm::new("I could not come up with a plan.");
    let err = llm
        .complete_structured::<Plan>("plan".to_string())
        .await
        .unwrap_err();
    assert!(err.is_parse_failure());
}
