// Anthropic Messages API client

use crate::TextGenerator;
use anyhow::{Context, Result};
use async_trait::async_trait;
use daily_juz_core::config::ModelSettings;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// API version header value
pub const API_VERSION: &str = "2023-06-01";

/// Client for `POST /v1/messages`.
///
/// One request per [`TextGenerator::generate`] call. Transport errors,
/// timeouts, non-success statuses and empty replies are all returned as
/// errors; nothing is retried.
pub struct AnthropicClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl AnthropicClient {
    /// Create a client authenticated with `api_key`
    pub fn new(api_key: &str, settings: &ModelSettings) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key)
            .context("API key contains characters not allowed in an HTTP header")?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/messages", settings.api_base),
            model: settings.name.clone(),
            max_tokens: settings.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending messages request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("Request to Anthropic API failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Anthropic API response")?;

        if !status.is_success() {
            anyhow::bail!(describe_error(status, &body));
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).context("Malformed response from Anthropic API")?;
        extract_text(parsed)
    }
}

/// Join the text blocks of a response, rejecting empty output
fn extract_text(response: MessagesResponse) -> Result<String> {
    if response.stop_reason.as_deref() == Some("max_tokens") {
        tracing::warn!("response truncated at max_tokens");
    }

    let text: String = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect();

    if text.trim().is_empty() {
        anyhow::bail!("Anthropic API returned no text content");
    }
    Ok(text)
}

fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => format!(
            "Anthropic API error ({}): {}: {}",
            status, err.error.kind, err.error.message
        ),
        Err(_) => format!("Anthropic API error ({})", status),
    }
}
