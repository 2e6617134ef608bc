use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use igpost_core::error::CoreError;
use igpost_graph::error::PublishError;
use serde_json::json;

/// Message returned for any malformed or invalid publish request body.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for boundary errors and [`PublishError`] for failed
/// publish runs. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `igpost_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A publish run aborted at some stage.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(details)) => {
                tracing::debug!(details = %details, "Rejected publish request");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": INVALID_BODY_MESSAGE,
                        "code": "VALIDATION_ERROR",
                        "details": details,
                    }),
                )
            }
            AppError::Core(CoreError::Configuration(msg)) => {
                tracing::error!(error = %msg, "Server is misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": msg,
                        "code": "CONFIGURATION_ERROR",
                    }),
                )
            }

            // --- Publish failures: message surfaced verbatim ---
            AppError::Publish(err) => {
                tracing::error!(stage = err.stage().label(), error = %err, "Publish failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": err.to_string(),
                        "code": "PUBLISH_FAILED",
                    }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
