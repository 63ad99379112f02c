use ferret_tools::{HttpPageFetcher, PageFetcher, ToolError};
use httpmock::prelude::*;

#[tokio::test]
async fn fetch_extracts_visible_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/article");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body("<html><body><h1>Title</h1><script>track()</script><p>Body text</p></body></html>");
    });

    let fetcher = HttpPageFetcher::new().expect("fetcher");
    let text = fetcher.fetch(&server.url("/article")).await.expect("fetch");
    assert_eq!(text, "Title\nBody text");
}

#[tokio::test]
async fn fetch_passes_plain_text_through() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notes.txt");
        then.status(200)
            .header("content-type", "text/plain")
            .body("<not html>");
    });

    let fetcher = HttpPageFetcher::new().expect("fetcher");
    let text = fetcher.fetch(&server.url("/notes.txt")).await.expect("fetch");
    assert_eq!(text, "<not html>");
}

#[tokio::test]
async fn fetch_error_status_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404);
    });

    let fetcher = HttpPageFetcher::new().expect("fetcher");
    let err = fetcher.fetch(&server.url("/missing")).await.unwrap_err();
    assert!(matches!(err, ToolError::Http(_)));
}

#[tokio::test]
async fn fetch_rejects_non_http_urls() {
    let fetcher = HttpPageFetcher::new().expect("fetcher");
    let err = fetcher.fetch("file:///etc/passwd").await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));
    let err = fetcher.fetch("not a url").await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));
}
