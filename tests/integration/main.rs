//! Integration tests for News-Harvest
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! transport, the worker pool and the dispatch-driven consumers end-to-end.

mod batch_tests;
mod board_tests;
mod transport_tests;

use news_harvest::config::Config;
use news_harvest::harvest::NewsFetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Allow-pattern matching any local mock server
pub const LOCAL_SERVICE: &str = r"^http://127\.0\.0\.1:\d+/";

/// Creates a test configuration that accepts the local mock server
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.fetch.concurrency = 3;
    config.fetch.timeout_secs = 5;
    config.services.allowed = vec![LOCAL_SERVICE.to_string()];
    config.dispatch.poll_interval_ms = 10;
    config
}

pub fn create_test_fetcher() -> NewsFetcher {
    NewsFetcher::from_config(&create_test_config()).expect("Failed to build fetcher")
}

/// Renders a news page with one container per `(title, href, summary)`
pub fn news_page(items: &[(&str, &str, Option<&str>)]) -> String {
    let containers: String = items
        .iter()
        .map(|(title, href, summary)| {
            let summary = summary
                .map(|text| format!(r#"<dd class="text">{}</dd>"#, text))
                .unwrap_or_default();
            format!(
                r#"<dl class="b-news-item"><dt><a class="title" href="{}">{}</a></dt>{}</dl>"#,
                href, title, summary
            )
        })
        .collect();

    format!(
        "<html><head><title>News</title></head><body>{}</body></html>",
        containers
    )
}

/// Mounts a 200 HTML page at `page_path`
pub async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}
