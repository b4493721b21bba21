//! JSON extractor with `{"detail": ...}` error bodies
//!
//! Wraps Axum's `Json` extractor so malformed request bodies get the same
//! error shape as handler failures instead of Axum's plain-text rejection.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Rejection produced when the request body cannot be read as `T`
///
/// - JSON syntax errors → 400 Bad Request
/// - Missing or mistyped fields → 422 Unprocessable Entity
/// - Missing content type → 415 Unsupported Media Type
#[derive(Debug)]
pub struct ApiJsonRejection(JsonRejection);

impl IntoResponse for ApiJsonRejection {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            JsonRejection::JsonSyntaxError(_) => (StatusCode::BAD_REQUEST, self.0.body_text()),
            JsonRejection::JsonDataError(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json".to_string(),
            ),
            _ => (StatusCode::BAD_REQUEST, self.0.body_text()),
        };

        tracing::debug!(status = status.as_u16(), detail = %detail, "Rejected request body");
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// Drop-in replacement for `axum::Json` in request position
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiJsonRejection(rejection)),
        }
    }
}
