//! HTTP request handlers for the portfolio-qa API

use crate::config::Config;
use crate::error::AppResult;
use crate::knowledge::KnowledgeLoader;
use crate::middleware::request_id_middleware;
use crate::provider::ProviderHandle;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod extractor;
pub mod health;
pub mod query;
pub mod root;

/// Application state shared across all handlers
///
/// Every field is cheap to clone, so Axum can hand a copy to each request.
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<Config>,
    knowledge: Arc<KnowledgeLoader>,
    provider: ProviderHandle,
}

impl AppState {
    /// Create state from configuration, building the provider client once
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let provider = ProviderHandle::from_config(&config.provider)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Create state around an already-built provider handle
    pub fn with_provider(config: Arc<Config>, provider: ProviderHandle) -> Self {
        let knowledge = Arc::new(KnowledgeLoader::new(&config.knowledge.path));
        Self {
            config,
            knowledge,
            provider,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn knowledge(&self) -> &KnowledgeLoader {
        &self.knowledge
    }

    pub fn provider(&self) -> &ProviderHandle {
        &self.provider
    }
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::handler))
        .route("/health", get(health::handler))
        .route("/query", post(query::handler))
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
