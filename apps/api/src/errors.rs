use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::metering::MeteringError;
use crate::settings::SettingsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Monthly quota exhausted (or the category is unavailable on the
    /// user's plan). The response message is stable; the frontend keys
    /// its upgrade prompt off it.
    #[error("AI generation limit reached")]
    LimitExceeded,

    /// A settings flag gates the whole feature off. Distinct from quota
    /// exhaustion.
    #[error("Feature disabled")]
    FeatureDisabled,

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Database(e) => AppError::Database(e),
            parse @ SettingsError::Parse { .. } => AppError::ConfigParse(parse.to_string()),
        }
    }
}

impl From<MeteringError> for AppError {
    fn from(err: MeteringError) -> Self {
        match err {
            MeteringError::LimitExceeded => AppError::LimitExceeded,
            MeteringError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::LimitExceeded => (
                StatusCode::FORBIDDEN,
                "LIMIT_EXCEEDED",
                "You have reached your monthly AI generation limit. Upgrade your plan to continue."
                    .to_string(),
            ),
            AppError::FeatureDisabled => (
                StatusCode::FORBIDDEN,
                "FEATURE_DISABLED",
                "This feature is currently disabled.".to_string(),
            ),
            AppError::ConfigParse(msg) => {
                tracing::error!("Config parse error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    "A configuration error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
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
