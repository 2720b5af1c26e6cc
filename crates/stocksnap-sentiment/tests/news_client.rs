//! Integration tests for `NewsClient::fetch_news` using wiremock HTTP mocks.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stocksnap_sentiment::{NewsClient, SentimentError};

const UA: &str = "Mozilla/5.0 (stocksnap-test)";

fn rss_with_items(n: usize) -> String {
    let items: String = (1..=n)
        .map(|i| {
            format!(
                "<item>\n  <title>\n    Headline {i}  </title>\n  <link>https://finance.yahoo.com/news/{i}</link>\n  <description>  Summary {i}\n</description>\n  <pubDate>Mon, 0{i} Jan 2024 12:00:00 +0000</pubDate>\n</item>\n"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Yahoo! Finance: AAPL News</title>
<description>Latest Financial News for AAPL</description>
{items}</channel></rss>"#
    )
}

fn test_client(base: &str) -> NewsClient {
    NewsClient::new(base, UA, Some(5)).expect("client construction should not fail")
}

/// Address of a local port with nothing listening on it.
fn refused_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

async fn mount_feed(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/rss/2.0/headline"))
        .and(query_param("s", "AAPL"))
        .and(query_param("region", "US"))
        .and(query_param("lang", "en-US"))
        .and(header("user-agent", UA))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_news_truncates_to_requested_count_in_feed_order() {
    let server = MockServer::start().await;
    mount_feed(&server, rss_with_items(5)).await;

    let news = test_client(&server.uri())
        .fetch_news("AAPL", 3)
        .await
        .expect("feed should parse");

    assert_eq!(news.len(), 3);
    for (i, item) in news.iter().enumerate() {
        assert_eq!(item.title, format!("Headline {}", i + 1));
        assert_eq!(item.summary, format!("Summary {}", i + 1));
    }
}

#[tokio::test]
async fn fetch_news_returns_all_when_feed_is_short() {
    let server = MockServer::start().await;
    mount_feed(&server, rss_with_items(2)).await;

    let news = test_client(&server.uri())
        .fetch_news("aapl", 10)
        .await
        .expect("short feed is not an error");

    assert_eq!(news.len(), 2);
    assert_eq!(news[1].title, "Headline 2");
}

#[tokio::test]
async fn fetch_news_server_error_fails_before_parsing() {
    let server = MockServer::start().await;

    // The body is a valid feed: a parser that ran would succeed.
    Mock::given(method("GET"))
        .and(path("/rss/2.0/headline"))
        .respond_with(ResponseTemplate::new(500).set_body_string(rss_with_items(3)))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_news("AAPL", 3)
        .await
        .expect_err("500 must be an error");

    match err {
        SentimentError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 500);
            assert!(url.contains("s=AAPL"), "url should name the ticker: {url}");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_news_not_found_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss/2.0/headline"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_news("AAPL", 5).await;
    assert!(matches!(
        result,
        Err(SentimentError::UnexpectedStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn fetch_news_entry_without_description_is_malformed() {
    let server = MockServer::start().await;
    let body = r#"<rss version="2.0"><channel>
        <item><title>Only a title</title></item>
    </channel></rss>"#
        .to_string();
    mount_feed(&server, body).await;

    let result = test_client(&server.uri()).fetch_news("AAPL", 5).await;
    assert!(
        matches!(
            result,
            Err(SentimentError::MalformedEntry {
                index: 0,
                field: "description"
            })
        ),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_news_transport_failure_is_http_error() {
    let result = test_client(&refused_uri()).fetch_news("AAPL", 5).await;
    assert!(matches!(result, Err(SentimentError::Http(_))), "got: {result:?}");
}
