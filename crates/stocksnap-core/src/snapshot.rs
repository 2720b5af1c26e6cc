use serde::{Deserialize, Serialize};

/// Name and price scraped from one quote page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Exchange symbol as requested, upper-cased (e.g. `"AAPL"`).
    pub ticker: String,
    /// Company display name, or the extractor's sentinel when the heading is missing.
    pub name: String,
    /// Price exactly as rendered on the page (e.g. `"195.27"`). `None` when absent.
    pub price: Option<String>,
}

/// One headline from the ticker's news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
}

/// Quote plus the most recent headlines for one ticker, in feed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub ticker: String,
    pub name: String,
    pub price: Option<String>,
    pub news: Vec<NewsItem>,
}

impl StockSnapshot {
    #[must_use]
    pub fn new(quote: Quote, news: Vec<NewsItem>) -> Self {
        Self {
            ticker: quote.ticker,
            name: quote.name,
            price: quote.price,
            news,
        }
    }

    /// The name/price portion of the snapshot as a table row.
    #[must_use]
    pub fn row(&self) -> QuoteRow {
        QuoteRow {
            ticker: self.ticker.clone(),
            name: self.name.clone(),
            price: self.price.clone(),
        }
    }
}

/// One line of the batch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub ticker: String,
    pub name: String,
    pub price: Option<String>,
}
