use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roomfit_core::error::{AnalysisError, CoreError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`AnalysisError`] and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `roomfit_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A room analysis pipeline failure.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Analysis pipeline errors ---
            AppError::Analysis(err) => classify_analysis_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an analysis failure into an HTTP status, error code, and message.
///
/// - Missing image maps to 400.
/// - Upstream HTTP failures keep the upstream status (502 if it is not a
///   valid status code).
/// - Network failures reaching the model map to 502.
/// - Everything else maps to 500. Messages never include model output or
///   upstream bodies; those are logged where the failure happens.
fn classify_analysis_error(err: &AnalysisError) -> (StatusCode, &'static str, String) {
    match err {
        AnalysisError::MissingInput => (
            StatusCode::BAD_REQUEST,
            "MISSING_IMAGE",
            "No image provided".to_string(),
        ),
        AnalysisError::MissingCredential => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "MISSING_CREDENTIAL",
            "Google API key not configured".to_string(),
        ),
        AnalysisError::UpstreamHttp { status, .. } => (
            StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            "UPSTREAM_ERROR",
            "Failed to analyze room".to_string(),
        ),
        AnalysisError::Transport(_) => (
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_UNREACHABLE",
            "Failed to analyze room".to_string(),
        ),
        AnalysisError::EmptyCandidate | AnalysisError::EmptyContent => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "EMPTY_ANALYSIS",
            "No analysis generated".to_string(),
        ),
        AnalysisError::NoJsonFound => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "NO_JSON_FOUND",
            "Failed to parse analysis - invalid response format".to_string(),
        ),
        AnalysisError::JsonParse(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INVALID_JSON",
            "Failed to parse analysis - invalid JSON".to_string(),
        ),
        AnalysisError::SchemaViolation { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "SCHEMA_VIOLATION",
            "Analysis missing required fields".to_string(),
        ),
    }
}
