mod pipeline;
mod report;

use serde::Serialize;
use stocksnap_core::{AppConfig, StockSnapshot};
use stocksnap_scraper::normalize_ticker;
use stocksnap_sentiment::{CompletionClient, NewsClient};

use crate::OutputFormat;
use pipeline::{run_batch, BatchReport, Collectors};

/// Outcome of one ticker's summary request. Exactly one of `summary` and
/// `error` is set.
#[derive(Debug, Serialize)]
struct TickerSummary {
    ticker: String,
    summary: Option<String>,
    error: Option<String>,
}

impl TickerSummary {
    fn failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Serialize)]
struct SnapshotOutput<'a> {
    #[serde(flatten)]
    report: &'a BatchReport,
    #[serde(skip_serializing_if = "<[TickerSummary]>::is_empty")]
    summaries: &'a [TickerSummary],
}

/// Requests a summary for every snapshot in order. A failed request is
/// recorded against its ticker and does not stop the others.
async fn summarize_all(
    client: &CompletionClient,
    snapshots: &[StockSnapshot],
) -> Vec<TickerSummary> {
    let mut summaries = Vec::with_capacity(snapshots.len());
    for snap in snapshots {
        let outcome = client.summarize(&snap.news, snap.price.as_deref()).await;
        let (summary, error) = match outcome {
            Ok(text) => (Some(text), None),
            Err(e) => {
                tracing::warn!(ticker = %snap.ticker, error = %e, "sentiment summary failed");
                (None, Some(e.to_string()))
            }
        };
        summaries.push(TickerSummary {
            ticker: snap.ticker.clone(),
            summary,
            error,
        });
    }
    summaries
}

fn render_json(report: &BatchReport, summaries: &[TickerSummary]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SnapshotOutput { report, summaries })
}

/// Build snapshots for `tickers` and print them.
///
/// The base report is always printed once the batch succeeds. Summary
/// failures are reported per ticker and then turned into the command's error.
///
/// # Errors
///
/// Returns an error if any ticker fails, the completion client cannot be
/// configured, or at least one summary request fails.
pub(crate) async fn run_snapshot_command(
    config: &AppConfig,
    tickers: &[String],
    news_count: usize,
    summarize: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    // Fail on a missing API key before any scraping happens.
    let completion = if summarize {
        Some(CompletionClient::from_config(config)?)
    } else {
        None
    };

    let collectors = Collectors::from_config(config)?;
    let report = run_batch(&collectors, tickers, news_count).await?;

    let summaries = match format {
        OutputFormat::Table => {
            print!("{}", report::quote_table(&report.rows));
            for snap in &report.snapshots {
                println!();
                print!("{}", report::headlines(&snap.ticker, &snap.news));
            }
            let mut summaries = Vec::new();
            if let Some(client) = &completion {
                summaries = summarize_all(client, &report.snapshots).await;
                for s in &summaries {
                    println!();
                    match (&s.summary, &s.error) {
                        (Some(text), _) => print!("{}", report::summary(&s.ticker, text)),
                        (None, Some(err)) => print!("{}", report::summary_failed(&s.ticker, err)),
                        (None, None) => {}
                    }
                }
            }
            summaries
        }
        OutputFormat::Json => {
            let summaries = match &completion {
                Some(client) => summarize_all(client, &report.snapshots).await,
                None => Vec::new(),
            };
            println!("{}", render_json(&report, &summaries)?);
            summaries
        }
    };

    let failed = summaries.iter().filter(|s| s.failed()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} sentiment summaries failed", summaries.len());
    }
    Ok(())
}

/// Print the latest headlines for one ticker.
///
/// # Errors
///
/// Returns an error if the ticker is empty or the feed request fails.
pub(crate) async fn run_news_command(
    config: &AppConfig,
    ticker: &str,
    news_count: usize,
) -> anyhow::Result<()> {
    let symbol = normalize_ticker(ticker)?;
    let client = NewsClient::from_config(config)?;
    let news = client.fetch_news(&symbol, news_count).await?;
    print!("{}", report::headlines(&symbol, &news));
    Ok(())
}

#[cfg(test)]
mod tests;
