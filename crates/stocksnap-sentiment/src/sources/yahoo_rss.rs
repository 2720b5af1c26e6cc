//! Yahoo Finance headline RSS collector.

use std::time::Duration;

use reqwest::{Client, Url};
use stocksnap_core::{AppConfig, NewsItem};

use super::rss_helpers;
use crate::error::SentimentError;

/// Reads `{base_url}/rss/2.0/headline?s={TICKER}&region=US&lang=en-US`.
pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    /// Creates a `NewsClient` for `base_url` (e.g. `https://feeds.finance.yahoo.com`).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidUrl`] if `base_url` does not parse,
    /// or [`SentimentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, SentimentError> {
        Url::parse(base_url).map_err(|e| SentimentError::InvalidUrl {
            url: base_url.to_owned(),
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

    /// Creates a `NewsClient` from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`NewsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        Self::new(
            &config.feed_base_url,
            &config.user_agent,
            config.request_timeout_secs,
        )
    }

    /// Fetches up to `count` headlines for `ticker`, newest first as the feed orders them.
    ///
    /// Returns fewer than `count` items when the feed has fewer.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::UnexpectedStatus`] on any non-2xx response; the body is not read.
    /// - [`SentimentError::Http`] on transport failure.
    /// - [`SentimentError::MalformedEntry`] / [`SentimentError::Xml`] on a bad feed.
    pub async fn fetch_news(
        &self,
        ticker: &str,
        count: usize,
    ) -> Result<Vec<NewsItem>, SentimentError> {
        let url = self.feed_url(ticker)?;
        tracing::debug!(%url, count, "fetching news feed");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        rss_helpers::parse_feed_items(&body, count)
    }

    fn feed_url(&self, ticker: &str) -> Result<Url, SentimentError> {
        let base = format!("{}/rss/2.0/headline", self.base_url);
        let mut url = Url::parse(&base).map_err(|e| SentimentError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("s", &ticker.trim().to_ascii_uppercase())
            .append_pair("region", "US")
            .append_pair("lang", "en-US");
        Ok(url)
    }
}
