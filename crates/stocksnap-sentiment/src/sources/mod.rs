//! News feed sources.

mod rss_helpers;
mod yahoo_rss;

pub use rss_helpers::parse_feed_items;
pub use yahoo_rss::NewsClient;
