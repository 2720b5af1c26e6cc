//! Plain-text rendering for snapshot output.

use std::fmt::Write as _;

use stocksnap_core::{NewsItem, QuoteRow};

const NO_PRICE: &str = "N/A";

/// Fixed-width name/price table, one line per row.
pub(crate) fn quote_table(rows: &[QuoteRow]) -> String {
    let mut out = format!("{:<12}{:<40}PRICE\n", "TICKER", "NAME");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<12}{:<40}{}",
            row.ticker,
            row.name,
            row.price.as_deref().unwrap_or(NO_PRICE)
        );
    }
    out
}

/// Numbered headline list under a ticker heading.
pub(crate) fn headlines(ticker: &str, news: &[NewsItem]) -> String {
    let mut out = format!("## {ticker}\n");
    if news.is_empty() {
        out.push_str("  (no headlines)\n");
        return out;
    }
    for (i, item) in news.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, item.title);
        if !item.summary.is_empty() {
            let _ = writeln!(out, "     {}", item.summary);
        }
    }
    out
}

pub(crate) fn summary(ticker: &str, text: &str) -> String {
    format!("## {ticker} sentiment\n{text}\n")
}

pub(crate) fn summary_failed(ticker: &str, error: &str) -> String {
    format!("## {ticker} sentiment\n  (summary unavailable: {error})\n")
}
