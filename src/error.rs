//! Error types for portfolio-qa
//!
//! Internal code returns precise variants; every variant collapses to the same
//! `{"detail": "Error processing query: ..."}` body in `IntoResponse`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Prefix applied to every error detail returned to clients
pub const DETAIL_PREFIX: &str = "Error processing query";

/// Failures talking to the completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build provider client: {0}")]
    ClientBuild(String),

    #[error("Provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider returned no completion text")]
    EmptyCompletion,
}

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Failed to read knowledge file {path}: {source}")]
    KnowledgeRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AppError {
    /// Short label for the variant, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_)
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigValidationFailed { .. } => "config",
            Self::KnowledgeRead { .. } => "knowledge",
            Self::Provider(_) => "provider",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error_kind = self.kind(), error = %self, "Request failed");

        let body = Json(serde_json::json!({
            "detail": format!("{}: {}", DETAIL_PREFIX, self),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
