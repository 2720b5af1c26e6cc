use crate::app_config::{
    AppConfig, DEFAULT_COMPLETION_MODEL, DEFAULT_COMPLETION_URL, DEFAULT_FEED_BASE_URL,
    DEFAULT_QUOTE_BASE_URL, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<u64>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(None),
        }
    };

    let log_level = or_default("STOCKSNAP_LOG_LEVEL", "info");
    let quote_base_url = trim_base(&or_default("STOCKSNAP_QUOTE_BASE_URL", DEFAULT_QUOTE_BASE_URL));
    let feed_base_url = trim_base(&or_default("STOCKSNAP_FEED_BASE_URL", DEFAULT_FEED_BASE_URL));
    let user_agent = or_default("STOCKSNAP_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_optional_u64("STOCKSNAP_REQUEST_TIMEOUT_SECS")?;

    let news_count = or_default("STOCKSNAP_NEWS_COUNT", "5")
        .parse::<usize>()
        .map_err(|e| invalid("STOCKSNAP_NEWS_COUNT", e.to_string()))?;
    if news_count == 0 {
        return Err(invalid(
            "STOCKSNAP_NEWS_COUNT",
            "must be at least 1".to_string(),
        ));
    }

    let completion_url = or_default("STOCKSNAP_COMPLETION_URL", DEFAULT_COMPLETION_URL);
    let completion_model = or_default("STOCKSNAP_COMPLETION_MODEL", DEFAULT_COMPLETION_MODEL);
    let completion_max_tokens = parse_u32("STOCKSNAP_COMPLETION_MAX_TOKENS", "150")?;
    let completion_api_key = lookup("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());

    Ok(AppConfig {
        log_level,
        quote_base_url,
        feed_base_url,
        user_agent,
        request_timeout_secs,
        news_count,
        completion_url,
        completion_model,
        completion_max_tokens,
        completion_api_key,
    })
}

fn trim_base(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}
