//! Completion provider abstraction
//!
//! [`CompletionProvider`] is the seam between the query handler and the
//! external model API. [`ProviderHandle`] is built once at start-up and
//! shared by every request.

pub mod openai;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult, ProviderError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use openai::OpenAiClient;

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One completion call: model, ordered messages and sampling parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    /// Build a request using the sampling parameters from configuration
    pub fn from_config(config: &ProviderConfig, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: config.model().to_string(),
            messages,
            max_tokens: config.max_tokens(),
            temperature: config.temperature(),
        }
    }
}

/// Something that turns a message list into completion text
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Return the text of the first completion choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

/// Process-wide access to the provider client
///
/// Constructed once before the server starts. When the credential is missing
/// the handle is still created, so the service can boot and answer health
/// checks, but [`ProviderHandle::get`] fails with a configuration error.
#[derive(Clone)]
pub struct ProviderHandle {
    provider: Option<Arc<dyn CompletionProvider>>,
}

/// Message returned when no credential is available
pub const MISSING_API_KEY: &str = "OpenAI API key not configured";

impl ProviderHandle {
    /// Build the OpenAI-compatible client from configuration
    pub fn from_config(config: &ProviderConfig) -> AppResult<Self> {
        let Some(api_key) = config.api_key() else {
            tracing::warn!(
                api_key_env = %config.api_key_env(),
                "Provider credential not set; /query will fail until it is configured"
            );
            return Ok(Self::unconfigured());
        };

        let client = OpenAiClient::new(config, api_key.clone())?;
        Ok(Self::with_provider(Arc::new(client)))
    }

    /// Wrap an existing provider (used by tests to inject stubs)
    pub fn with_provider(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A handle with no credential
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Get the shared provider, or a configuration error if none is set
    pub fn get(&self) -> AppResult<Arc<dyn CompletionProvider>> {
        self.provider
            .clone()
            .ok_or_else(|| AppError::Config(MISSING_API_KEY.to_string()))
    }
}

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("configured", &self.is_configured())
            .finish()
    }
}
