use ferret_core::{LlmExt, Runnable};
use ferret_llm::{LlmRequest, OllamaClient};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn ollama_invoke_maps_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat")
            .body_contains("\"model\":\"llama3.1\"")
            .body_contains("\"stream\":false");
        then.status(200).json_body(json!({
            "message": {"role": "assistant", "content": "hello"},
            "done": true
        }));
    });

    let client = OllamaClient::new(server.url(""), "llama3.1".to_string()).expect("client");
    let resp = client
        .invoke(LlmRequest::from_prompt("hi"))
        .await
        .expect("invoke");
    assert_eq!(resp.content, "hello");
    mock.assert();
}

#[tokio::test]
async fn ollama_forwards_response_schema_as_format() {
    #[derive(serde::Deserialize, schemars::JsonSchema)]
    struct Verdict {
        is_complete: bool,
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat")
            .body_contains("\"format\"")
            .body_contains("is_complete");
        then.status(200).json_body(json!({
            "message": {"role": "assistant", "content": "{\"is_complete\": true}"},
            "done": true
        }));
    });

    let client = OllamaClient::new(server.url(""), "llama3.1".to_string()).expect("client");
    let verdict: Verdict = client
        .complete_structured("judge".to_string())
        .await
        .expect("structured");
    assert!(verdict.is_complete);
    mock.assert();
}

#[tokio::test]
async fn ollama_http_error_is_provider_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(500).body("boom");
    });

    let client = OllamaClient::new(server.url(""), "llama3.1".to_string()).expect("client");
    let err = client
        .invoke(LlmRequest::from_prompt("hi"))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("LLM provider failed"));
    assert!(!err.is_parse_failure());
}
