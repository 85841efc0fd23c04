//! REST client for the Gemini `generateContent` endpoint.
//!
//! Wraps `POST {api_url}/models/{model}:generateContent` using [`reqwest`].
//! One call per invocation; retry policy belongs to the caller.

use async_trait::async_trait;

use roomfit_core::error::AnalysisError;

use crate::request::GenerateContentRequest;
use crate::response::GenerateContentResponse;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Errors from the Gemini REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Gemini answered 2xx with a body that is not a reply envelope.
    #[error("Invalid Gemini response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<GeminiApiError> for AnalysisError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Request(e) => AnalysisError::Transport(e.to_string()),
            GeminiApiError::ApiError { status, body } => AnalysisError::UpstreamHttp { status, body },
            GeminiApiError::Decode(_) => AnalysisError::EmptyCandidate,
        }
    }
}

/// Anything that can answer a `generateContent` request.
///
/// Implemented by [`GeminiApi`]; tests substitute canned replies.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError>;
}

/// HTTP client for the Gemini API.
pub struct GeminiApi {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl GeminiApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base URL including version, e.g.
    ///   `https://generativelanguage.googleapis.com/v1beta`.
    /// * `model` - Model name, e.g. `gemini-2.5-flash`.
    pub fn new(api_url: String, model: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, model)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, model: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Model name requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` URL.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GeminiApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerateContent for GeminiApi {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let body = Self::ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str::<GenerateContentResponse>(&body)?)
    }
}
