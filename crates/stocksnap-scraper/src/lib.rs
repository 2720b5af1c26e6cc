//! Quote-page scraping for stocksnap.
//!
//! [`QuoteClient`] downloads the Yahoo Finance quote page for a ticker and
//! wraps it in a [`QuotePage`]; the functions in [`extract`] pull the company
//! name and current price out of that markup.

pub mod client;
pub mod error;
pub mod extract;
pub mod markup;

pub use client::{normalize_ticker, QuoteClient};
pub use error::ScraperError;
pub use extract::{extract_company_name, extract_price, NAME_NOT_FOUND};
pub use markup::QuotePage;
