use ferret_tools::{TavilySearch, ToolError, WebSearch};
use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::json;

fn search(server: &MockServer) -> TavilySearch {
    TavilySearch::new(SecretString::new("tvly-test".to_string()))
        .expect("search")
        .with_base_url(server.url(""))
}

#[tokio::test]
async fn search_maps_results_and_caps_count() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/search")
            .header("authorization", "Bearer tvly-test")
            .body_contains("\"max_results\":3")
            .body_contains("solid-state");
        then.status(200).json_body(json!({
            "query": "solid-state",
            "results": [
                {"title": "A", "url": "https://a.example", "content": "a", "score": 0.9},
                {"title": "B", "url": "https://b.example", "content": "b", "score": 0.8},
                {"title": "C", "url": "https://c.example", "content": "c"},
                {"title": "D", "url": "https://d.example", "content": "d"}
            ]
        }));
    });

    let results = search(&server).search("solid-state").await.expect("search");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].url, "https://a.example");
    assert_eq!(results[0].score, Some(0.9));
    assert_eq!(results[2].score, None);
    mock.assert();
}

#[tokio::test]
async fn search_failure_is_http_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(401).body("bad key");
    });

    let err = search(&server).search("anything").await.unwrap_err();
    match err {
        ToolError::Http(message) => assert!(message.contains("401")),
        other => panic!("expected Http, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let server = MockServer::start();
    let err = search(&server).search("  ").await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));
}

#[test]
fn empty_api_key_is_rejected() {
    assert!(TavilySearch::new(SecretString::new(String::new())).is_err());
}
