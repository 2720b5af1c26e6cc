//! HTTP client for Yahoo Finance quote pages.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use stocksnap_core::AppConfig;

use crate::error::ScraperError;
use crate::markup::QuotePage;

/// Characters left as-is in the ticker path segment (`BRK-B`, `RDS.A`).
const TICKER_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Fetches quote pages from `{base_url}/quote/{TICKER}/`.
///
/// Every request carries the configured browser `User-Agent`. The response
/// status is not inspected: whatever body comes back is handed to the
/// extractors, which report missing fields rather than failing.
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    /// Creates a `QuoteClient` for `base_url` (e.g. `https://finance.yahoo.com`).
    ///
    /// `timeout_secs` of `None` leaves requests without a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ScraperError> {
        reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Creates a `QuoteClient` from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`QuoteClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.quote_base_url,
            &config.user_agent,
            config.request_timeout_secs,
        )
    }

    /// Downloads the quote page for `ticker`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidTicker`] if `ticker` is empty or whitespace.
    /// - [`ScraperError::Http`] on any transport failure.
    pub async fn fetch_quote_page(&self, ticker: &str) -> Result<QuotePage, ScraperError> {
        let url = self.quote_url(ticker)?;
        tracing::debug!(%url, "fetching quote page");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "quote page received");
        Ok(QuotePage::new(body))
    }

    /// Builds the quote page URL for `ticker`, upper-casing the symbol.
    fn quote_url(&self, ticker: &str) -> Result<String, ScraperError> {
        let symbol = normalize_ticker(ticker)?;
        let segment = utf8_percent_encode(&symbol, TICKER_SEGMENT);
        Ok(format!("{}/quote/{segment}/", self.base_url))
    }
}

/// Trims and upper-cases a ticker symbol.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidTicker`] for an empty symbol.
pub fn normalize_ticker(ticker: &str) -> Result<String, ScraperError> {
    let symbol = ticker.trim();
    if symbol.is_empty() {
        return Err(ScraperError::InvalidTicker {
            ticker: ticker.to_owned(),
            reason: "ticker must not be empty".to_owned(),
        });
    }
    Ok(symbol.to_ascii_uppercase())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
