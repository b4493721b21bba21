//! Query endpoint handler
//!
//! Handles POST /query: embeds the knowledge document into a prompt, asks the
//! completion provider, and relays the answer.

use crate::error::AppResult;
use crate::handlers::AppState;
use crate::handlers::extractor::ApiJson;
use crate::middleware::RequestId;
use crate::prompt;
use crate::provider::CompletionRequest;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

/// Question submitted by the client
///
/// Only the type is checked; the text is forwarded as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Answer returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The original query, verbatim
    pub query: String,
    /// Text of the first completion choice
    pub response: String,
    /// Model identifier the request was sent to
    pub model_used: String,
}

/// Answer one query end to end
///
/// The provider handle is checked before the knowledge file is read, so a
/// missing credential fails without any I/O or network traffic.
pub async fn answer_query(
    state: &AppState,
    query: &str,
    request_id: RequestId,
) -> AppResult<QueryResponse> {
    let provider = state.provider().get()?;

    let knowledge = state.knowledge().load().await?;
    let provider_config = &state.config().provider;

    tracing::debug!(
        request_id = %request_id,
        knowledge_length = knowledge.len(),
        model = %provider_config.model(),
        "Composing prompt"
    );

    let request =
        CompletionRequest::from_config(provider_config, prompt::build_messages(&knowledge, query));
    let response = provider.complete(&request).await?;

    tracing::info!(
        request_id = %request_id,
        response_length = response.len(),
        "Query answered"
    );

    Ok(QueryResponse {
        query: query.to_string(),
        response,
        model_used: request.model,
    })
}

/// POST /query handler
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(request): ApiJson<QueryRequest>,
) -> AppResult<Json<QueryResponse>> {
    tracing::debug!(
        request_id = %request_id,
        query_length = request.query.len(),
        "Received query"
    );

    answer_query(&state, &request.query, request_id)
        .await
        .map(Json)
}
