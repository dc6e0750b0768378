use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::sanitize::ParseFailure;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Neither the request nor the process config supplied a credential.
    #[error("No API key provided")]
    MissingApiKey,

    /// The body could not be read as JSON at all. Only reported once a credential
    /// is known to exist, so a keyless request still gets `MissingApiKey`.
    #[error("Invalid request body: {details}")]
    InvalidBody { status: StatusCode, details: String },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("{label}: {failure}")]
    Parse {
        label: &'static str,
        failure: ParseFailure,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingApiKey => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No API key provided" }),
            ),
            AppError::InvalidBody { status, details } => (
                *status,
                json!({
                    "error": "Invalid request body",
                    "details": details
                }),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Completion request failed",
                        "details": e.to_string()
                    }),
                )
            }
            AppError::Parse { label, failure } => {
                tracing::error!("{label}: {}", failure.details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": label,
                        "details": failure.details,
                        "raw": failure.raw
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_api_key_is_400_with_exact_body() {
        let (status, body) = render(AppError::MissingApiKey).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No API key provided"}));
    }

    #[tokio::test]
    async fn test_parse_failure_keeps_raw_text() {
        let (status, body) = render(AppError::Parse {
            label: "Failed to parse signals",
            failure: ParseFailure {
                details: "expected value at line 1 column 1".to_string(),
                raw: "not json at all".to_string(),
            },
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "error": "Failed to parse signals",
                "details": "expected value at line 1 column 1",
                "raw": "not json at all"
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_body_keeps_rejection_status() {
        let (status, body) = render(AppError::InvalidBody {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            details: "Expected request with `Content-Type: application/json`".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"], "Invalid request body");
        assert!(body["details"].as_str().unwrap().contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_llm_fault_is_500_with_details() {
        let (status, body) = render(AppError::Llm(LlmError::Api {
            status: 429,
            message: "Rate limit reached".to_string(),
        }))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Completion request failed");
        assert_eq!(
            body["details"],
            "API error (status 429): Rate limit reached"
        );
    }
}
