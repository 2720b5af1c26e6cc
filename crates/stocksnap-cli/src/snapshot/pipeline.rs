//! Per-ticker snapshot pipeline and the sequential batch runner.

use serde::Serialize;
use stocksnap_core::{AppConfig, Quote, QuoteRow, StockSnapshot};
use stocksnap_scraper::{extract_company_name, extract_price, normalize_ticker, QuoteClient};
use stocksnap_sentiment::NewsClient;

/// The two HTTP clients a snapshot needs, built once per run.
pub(crate) struct Collectors {
    pub(crate) quotes: QuoteClient,
    pub(crate) news: NewsClient,
}

impl Collectors {
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            quotes: QuoteClient::from_config(config)?,
            news: NewsClient::from_config(config)?,
        })
    }
}

/// Name/price table plus the full snapshots, both in input order.
#[derive(Debug, Serialize)]
pub(crate) struct BatchReport {
    pub(crate) rows: Vec<QuoteRow>,
    pub(crate) snapshots: Vec<StockSnapshot>,
}

/// Quote page → name → price → news, one step after another.
///
/// Errors from any step are returned as-is; the underlying
/// `ScraperError` / `SentimentError` is reachable with `downcast_ref`.
pub(crate) async fn build_snapshot(
    collectors: &Collectors,
    ticker: &str,
    news_count: usize,
) -> anyhow::Result<StockSnapshot> {
    let symbol = normalize_ticker(ticker)?;

    let page = collectors.quotes.fetch_quote_page(&symbol).await?;
    let name = extract_company_name(&page);
    let price = extract_price(&page);
    let news = collectors.news.fetch_news(&symbol, news_count).await?;

    Ok(StockSnapshot::new(
        Quote {
            ticker: symbol,
            name,
            price,
        },
        news,
    ))
}

/// Builds a snapshot for each ticker in order.
///
/// The first failing ticker aborts the batch: no report is returned for the
/// tickers that did succeed.
pub(crate) async fn run_batch(
    collectors: &Collectors,
    tickers: &[String],
    news_count: usize,
) -> anyhow::Result<BatchReport> {
    let mut snapshots = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        let snapshot = build_snapshot(collectors, ticker, news_count).await?;
        tracing::info!(
            ticker = %snapshot.ticker,
            price = snapshot.price.as_deref().unwrap_or("-"),
            news = snapshot.news.len(),
            "snapshot complete"
        );
        snapshots.push(snapshot);
    }

    let rows = snapshots.iter().map(StockSnapshot::row).collect();
    Ok(BatchReport { rows, snapshots })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
