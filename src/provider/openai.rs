//! OpenAI-compatible chat completions client
//!
//! Sends `POST {base_url}/chat/completions` with bearer auth and returns the
//! first choice's message content.

use super::{CompletionProvider, CompletionRequest};
use crate::config::{ApiKey, ProviderConfig};
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Longest upstream error body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible completions API
///
/// Wraps a single `reqwest::Client`, so the connection pool is shared by
/// every request that goes through the same instance.
pub struct OpenAiClient {
    http: reqwest::Client,
    completions_url: String,
    api_key: ApiKey,
}

impl OpenAiClient {
    pub fn new(config: &ProviderConfig, api_key: ApiKey) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            completions_url: format!("{}/chat/completions", config.base_url().trim_end_matches('/')),
            api_key,
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        tracing::debug!(
            url = %self.completions_url,
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending completion request"
        );

        let response = self
            .http
            .post(&self.completions_url)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Provider returned an error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyCompletion)
    }
}
