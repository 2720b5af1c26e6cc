use serde_json::{json, Value};
use stocksnap_core::NewsItem;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn snapshot(ticker: &str, title: &str, price: Option<&str>) -> StockSnapshot {
    StockSnapshot {
        ticker: ticker.to_string(),
        name: format!("{ticker} Corp"),
        price: price.map(str::to_string),
        news: vec![NewsItem {
            title: title.to_string(),
            summary: "details".to_string(),
        }],
    }
}

fn report(snapshots: Vec<StockSnapshot>) -> BatchReport {
    BatchReport {
        rows: snapshots.iter().map(StockSnapshot::row).collect(),
        snapshots,
    }
}

fn completion_client(server: &MockServer) -> CompletionClient {
    CompletionClient::new(
        &format!("{}/v1/chat/completions", server.uri()),
        "sk-test",
        "gpt-4o-mini",
        150,
    )
}

/// 200 for prompts mentioning Apple, 429 for everything else.
async fn mount_completion(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Apple beats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": " Positive. " } }]
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn failed_summary_does_not_stop_later_tickers() {
    let server = MockServer::start().await;
    mount_completion(&server).await;

    let snapshots = vec![
        snapshot("MSFT", "Cloud slows", Some("410.10")),
        snapshot("AAPL", "Apple beats", Some("195.27")),
    ];
    let summaries = summarize_all(&completion_client(&server), &snapshots).await;

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].ticker, "MSFT");
    assert!(summaries[0].failed());
    assert!(summaries[0].summary.is_none());
    assert!(summaries[0].error.as_deref().unwrap().contains("429"));
    assert_eq!(summaries[1].ticker, "AAPL");
    assert!(!summaries[1].failed());
    assert_eq!(summaries[1].summary.as_deref(), Some("Positive."));
}

#[tokio::test]
async fn json_output_keeps_snapshots_when_summary_fails() {
    let server = MockServer::start().await;
    mount_completion(&server).await;

    let report = report(vec![snapshot("MSFT", "Cloud slows", None)]);
    let summaries = summarize_all(&completion_client(&server), &report.snapshots).await;
    let out: Value = serde_json::from_str(&render_json(&report, &summaries).unwrap()).unwrap();

    assert_eq!(out["rows"][0]["ticker"], "MSFT");
    assert_eq!(out["snapshots"][0]["name"], "MSFT Corp");
    assert!(out["snapshots"][0]["price"].is_null());
    assert_eq!(out["snapshots"][0]["news"][0]["title"], "Cloud slows");
    assert!(out["summaries"][0]["summary"].is_null());
    assert!(out["summaries"][0]["error"]
        .as_str()
        .unwrap()
        .contains("429"));
}

#[test]
fn json_output_omits_summaries_when_not_requested() {
    let report = report(vec![snapshot("AAPL", "Apple beats", Some("195.27"))]);
    let out: Value = serde_json::from_str(&render_json(&report, &[]).unwrap()).unwrap();

    assert!(out.get("summaries").is_none());
    assert_eq!(out["rows"][0]["price"], "195.27");
}
