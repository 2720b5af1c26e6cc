//! News collection and sentiment summarization for stocksnap.
//!
//! [`NewsClient`] reads the Yahoo Finance headline RSS feed for a ticker.
//! [`CompletionClient`] sends those headlines plus the quote price to a
//! hosted chat-completion endpoint and returns its summary text.

pub mod error;
pub mod summarizer;

mod sources;

pub use error::SentimentError;
pub use sources::{parse_feed_items, NewsClient};
pub use summarizer::{build_prompt, CompletionClient};
