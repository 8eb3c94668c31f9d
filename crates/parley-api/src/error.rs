use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parley_chat::ChatError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Chat(e) => chat_error_status(e),
        }
    }
}

/// Status code for a failed submit cycle.
///
/// Credential problems are the server's, not the caller's, so they map to a
/// gateway error rather than 401.
pub fn chat_error_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::Provider(_) if err.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
        ChatError::Authentication(_) | ChatError::Provider(_) => StatusCode::BAD_GATEWAY,
        ChatError::Context(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, retryable, message) = match &self {
            ApiError::BadRequest(_) => ("bad_request", false, self.to_string()),
            ApiError::Chat(e) => {
                tracing::error!(kind = e.kind(), "Chat error: {}", e);
                (e.kind(), e.is_retryable(), e.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "kind": kind,
            "retryable": retryable,
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
