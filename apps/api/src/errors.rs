use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::prompt::PromptError;
use crate::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Caller-caused failures map to 4xx. Model failures map to 5xx and keep
/// "model unreachable" apart from "model output unusable".
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Model response could not be parsed: {0}")]
    ResponseParse(String),

    #[error("Model response violates schema at {path}: {message}")]
    SchemaViolation { path: String, message: String },

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Parse(msg) => AppError::ResponseParse(msg),
            ValidationError::Schema { path, message } => {
                AppError::SchemaViolation { path, message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::ModelInvocation(msg) => {
                tracing::error!("Model invocation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_UNAVAILABLE",
                    "The language model could not be reached".to_string(),
                )
            }
            AppError::ResponseParse(msg) => {
                tracing::error!("Model output unparseable: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_OUTPUT_UNPARSEABLE",
                    "The language model returned output that could not be parsed".to_string(),
                )
            }
            AppError::SchemaViolation { path, message } => {
                tracing::error!("Model output schema violation at {path}: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_SCHEMA_VIOLATION",
                    format!("The language model returned an invalid value at {path}"),
                )
            }
            AppError::Prompt(e) => {
                tracing::error!("Prompt error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROMPT_ERROR",
                    "A prompt could not be built".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_failures_are_distinguishable() {
        let unreachable = AppError::ModelInvocation("timeout".into()).into_response();
        let unusable = AppError::ResponseParse("no JSON".into()).into_response();
        assert_eq!(unreachable.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(unusable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_caller_errors_are_4xx() {
        assert_eq!(
            AppError::Extraction("bad pdf".into()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Forbidden("not yours".into()).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("gone".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_schema_violation_converts_from_validation_error() {
        let err: AppError = ValidationError::Schema {
            path: "work[0].type".into(),
            message: "unexpected value".into(),
        }
        .into();
        assert!(matches!(err, AppError::SchemaViolation { ref path, .. } if path == "work[0].type"));
    }
}
