//! Chat-completion client for headline sentiment summaries.

use serde::{Deserialize, Serialize};
use stocksnap_core::{AppConfig, NewsItem};

use crate::error::SentimentError;

/// Shown in the prompt when the quote page had no price.
const PRICE_UNAVAILABLE: &str = "unavailable";

/// Sends a snapshot's headlines and price to a chat-completion endpoint.
///
/// Decoding is pinned to temperature 0 with a bounded `max_tokens`.
pub struct CompletionClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl CompletionClient {
    #[must_use]
    pub fn new(url: &str, api_key: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            max_tokens,
        }
    }

    /// Creates a `CompletionClient` from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Completion`] if no API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        let api_key = config.completion_api_key.as_deref().ok_or_else(|| {
            SentimentError::Completion("OPENAI_API_KEY is not set".to_string())
        })?;
        Ok(Self::new(
            &config.completion_url,
            api_key,
            &config.completion_model,
            config.completion_max_tokens,
        ))
    }

    /// Returns the model's summary of `news` at `price`, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Completion`] if the request fails, the
    /// endpoint answers non-2xx, or the response carries no message content.
    pub async fn summarize(
        &self,
        news: &[NewsItem],
        price: Option<&str>,
    ) -> Result<String, SentimentError> {
        let prompt = build_prompt(news, price);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: 0.0,
        };

        tracing::debug!(model = %self.model, items = news.len(), "requesting sentiment summary");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::Completion(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Completion(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Completion(format!("response parse error: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| SentimentError::Completion("response has no message content".into()))
    }
}

/// Renders the summary prompt: one `title: summary` line per headline, then the price.
#[must_use]
pub fn build_prompt(news: &[NewsItem], price: Option<&str>) -> String {
    let mut prompt = String::from(
        "Analyze the sentiment of the following news headlines about a stock \
         and summarize it in two or three sentences.\n\nNews:\n",
    );
    for item in news {
        prompt.push_str("- ");
        prompt.push_str(&item.title);
        prompt.push_str(": ");
        prompt.push_str(&item.summary);
        prompt.push('\n');
    }
    prompt.push_str("\nCurrent price: ");
    prompt.push_str(price.unwrap_or(PRICE_UNAVAILABLE));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, summary: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn prompt_lists_each_item_then_price() {
        let prompt = build_prompt(
            &[item("Apple beats", "Revenue up."), item("iPhone delay", "Supply issue.")],
            Some("195.27"),
        );
        let beats = prompt.find("- Apple beats: Revenue up.").unwrap();
        let delay = prompt.find("- iPhone delay: Supply issue.").unwrap();
        let price = prompt.find("Current price: 195.27").unwrap();
        assert!(beats < delay && delay < price);
        assert!(prompt.ends_with("195.27"));
    }

    #[test]
    fn prompt_marks_missing_price() {
        let prompt = build_prompt(&[], None);
        assert!(prompt.ends_with("Current price: unavailable"));
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = AppConfig {
            log_level: "info".into(),
            quote_base_url: "https://finance.yahoo.com".into(),
            feed_base_url: "https://feeds.finance.yahoo.com".into(),
            user_agent: "ua".into(),
            request_timeout_secs: None,
            news_count: 5,
            completion_url: "https://api.openai.com/v1/chat/completions".into(),
            completion_model: "gpt-4o-mini".into(),
            completion_max_tokens: 150,
            completion_api_key: None,
        };
        assert!(matches!(
            CompletionClient::from_config(&config),
            Err(SentimentError::Completion(_))
        ));
    }

    #[test]
    fn request_serializes_single_user_message() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 150,
            temperature: 0.0,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["max_tokens"], 150);
        assert_eq!(value["temperature"], 0.0);
    }
}
