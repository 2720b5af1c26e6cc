/// Desktop browser UA sent with every quote and feed request.
///
/// Yahoo rejects default client identifiers with a consent or 429 page.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_QUOTE_BASE_URL: &str = "https://finance.yahoo.com";
pub const DEFAULT_FEED_BASE_URL: &str = "https://feeds.finance.yahoo.com";
pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Process-wide settings, built once at startup and passed into each client.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub quote_base_url: String,
    pub feed_base_url: String,
    pub user_agent: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
    /// Headlines kept per ticker when the caller does not pass a count.
    pub news_count: usize,
    pub completion_url: String,
    pub completion_model: String,
    pub completion_max_tokens: u32,
    pub completion_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("quote_base_url", &self.quote_base_url)
            .field("feed_base_url", &self.feed_base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("news_count", &self.news_count)
            .field("completion_url", &self.completion_url)
            .field("completion_model", &self.completion_model)
            .field("completion_max_tokens", &self.completion_max_tokens)
            .field(
                "completion_api_key",
                &self.completion_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
