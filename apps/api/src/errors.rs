use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Grammar service error: {0}")]
    GrammarService(String),

    #[error("Dependency parser error: {0}")]
    Parser(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::GrammarService(msg) => {
                tracing::error!("Grammar service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The grammar service is unavailable".to_string(),
                )
            }
            AppError::Parser(msg) => {
                tracing::error!("Dependency parser error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The dependency parser is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("No text provided".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_failures_map_to_bad_gateway() {
        let grammar = AppError::GrammarService("connection refused".to_string()).into_response();
        assert_eq!(grammar.status(), StatusCode::BAD_GATEWAY);

        let parser = AppError::Parser("timeout".to_string()).into_response();
        assert_eq!(parser.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
