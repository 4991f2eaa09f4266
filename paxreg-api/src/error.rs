//! Error types for paxreg-api
//!
//! Every handler translates store/gateway failures into exactly one of
//! these kinds; raw sqlx/reqwest errors never reach the wire. Registry
//! outcomes render `{"message": ...}`; external-gateway outcomes carry an
//! additional `error` field with diagnostic text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::verify_client::VerifyError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - duplicate cpf on insert
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Required query parameter absent on the external passthrough (400)
    #[error("Missing '{0}' query parameter")]
    MissingParam(&'static str),

    /// External verification call exceeded its timeout (504)
    #[error("External API request timed out")]
    ExternalTimeout,

    /// External verification endpoint answered non-2xx (502)
    #[error("External API error: {0}")]
    ExternalHttp(String),

    /// Unclassified failure on the external passthrough (500)
    #[error("Unexpected error: {0}")]
    ExternalUnexpected(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "message": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            ApiError::MissingParam(name) => {
                let text = format!("Missing '{}' query parameter", name);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": text, "error": text }),
                )
            }
            ApiError::ExternalTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({
                    "message": "External API request timed out",
                    "error": "External API request timed out",
                }),
            ),
            ApiError::ExternalHttp(detail) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "message": "External API error",
                    "error": format!("External API error: {}", detail),
                }),
            ),
            ApiError::ExternalUnexpected(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": "Unexpected error",
                    "error": format!("Unexpected error: {}", detail),
                }),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<VerifyError> for ApiError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Timeout => ApiError::ExternalTimeout,
            VerifyError::Http { status, body } => {
                ApiError::ExternalHttp(format!("{} {}", status, body))
            }
            VerifyError::Network(detail) => ApiError::ExternalUnexpected(detail),
            VerifyError::Parse(detail) => ApiError::ExternalUnexpected(detail),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
