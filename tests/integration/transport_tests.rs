use crate::mount_page;
use news_harvest::config::FetchConfig;
use news_harvest::harvest::TransportClient;
use news_harvest::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_with(configure: impl FnOnce(&mut FetchConfig)) -> TransportClient {
    let mut config = FetchConfig::default();
    config.timeout_secs = 5;
    configure(&mut config);
    TransportClient::new(&config).expect("Failed to build transport")
}

#[tokio::test]
async fn test_fetch_ok() {
    let server = MockServer::start().await;
    mount_page(&server, "/world.html", "<html>hello</html>".to_string()).await;

    let url = format!("{}/world.html", server.uri());
    let page = transport_with(|_| {}).fetch(&url).await.unwrap();

    assert_eq!(page.status_code, 200);
    assert_eq!(page.final_url.as_str(), url);
    assert_eq!(page.body, "<html>hello</html>");
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'f', 0xff, b'o']))
        .mount(&server)
        .await;

    let page = transport_with(|_| {})
        .fetch(&format!("{}/bytes", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.body, "f\u{FFFD}o");
}

#[tokio::test]
async fn test_body_is_capped() {
    let server = MockServer::start().await;
    mount_page(&server, "/big", "x".repeat(100_000)).await;

    let page = transport_with(|config| config.max_content_length = 10)
        .fetch(&format!("{}/big", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.body, "x".repeat(10));
}

#[tokio::test]
async fn test_not_found_is_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>gone</html>"))
        .mount(&server)
        .await;

    let result = transport_with(|_| {})
        .fetch(&format!("{}/gone", server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(FetchError::UnexpectedResponse { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_bare_redirect_status_is_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301))
        .mount(&server)
        .await;

    let result = transport_with(|_| {})
        .fetch(&format!("{}/moved", server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(FetchError::UnexpectedResponse { status: 301, .. })
    ));
}

#[tokio::test]
async fn test_followed_redirect_is_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/new", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/new", "<html>new</html>".to_string()).await;

    let result = transport_with(|_| {})
        .fetch(&format!("{}/old", server.uri()))
        .await;

    match result {
        Err(FetchError::UnexpectedResponse {
            status, final_url, ..
        }) => {
            assert_eq!(status, 200);
            assert_eq!(final_url, format!("{}/new", server.uri()));
        }
        other => panic!("expected UnexpectedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let result = transport_with(|config| config.timeout_secs = 1)
        .fetch(&format!("{}/slow", server.uri()))
        .await;

    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "news-harvest-test/1.0"))
        .and(header("accept-language", "ru"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let transport = transport_with(|config| {
        config.user_agent = Some("news-harvest-test/1.0".to_string());
        config
            .headers
            .insert("Accept-Language".to_string(), "ru".to_string());
    });

    let page = transport
        .fetch(&format!("{}/ua", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.body, "ok");
}

#[tokio::test]
async fn test_cookies_do_not_leak_between_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/set"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc; Path=/")
                .set_body_string("set"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // Mounted second, so it only answers requests without a cookie
    mount_page(&server, "/check", "clean".to_string()).await;

    let transport = transport_with(|_| {});
    transport
        .fetch(&format!("{}/set", server.uri()))
        .await
        .unwrap();
    let page = transport
        .fetch(&format!("{}/check", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.body, "clean");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so nothing accepts on the port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = transport_with(|_| {})
        .fetch(&format!("http://127.0.0.1:{}/", port))
        .await;

    assert!(matches!(result, Err(FetchError::Transport { .. })));
}
