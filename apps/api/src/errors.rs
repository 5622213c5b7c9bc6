use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::audit::AuditError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Generation(#[from] LlmError),

    #[error("A request for this form is already in progress")]
    Busy,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Audit(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Generation(e @ LlmError::MissingCredential) => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_ERROR",
                e.user_message(),
            ),
            AppError::Generation(e @ LlmError::Transport(_)) => {
                tracing::error!("Generation transport error: {e}");
                (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR", e.user_message())
            }
            AppError::Generation(e @ LlmError::Upstream { .. }) => {
                tracing::error!("Generation upstream error: {e}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", e.user_message())
            }
            AppError::Busy => (
                StatusCode::CONFLICT,
                "BUSY",
                "処理中です。前のリクエストが終わるまでお待ちください。".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
