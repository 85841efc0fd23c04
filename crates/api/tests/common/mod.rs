#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use roomfit_api::config::{GeminiConfig, ServerConfig, DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL};
use roomfit_api::router::build_app_router;
use roomfit_api::state::AppState;
use roomfit_core::catalog::Catalog;
use roomfit_gemini::analyzer::RoomAnalyzer;
use roomfit_gemini::api::{GeminiApiError, GenerateContent};
use roomfit_gemini::request::GenerateContentRequest;
use roomfit_gemini::response::GenerateContentResponse;

pub const TEST_API_KEY: &str = "test-api-key";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(api_key: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        catalog_path: None,
        gemini: GeminiConfig {
            api_key: api_key.map(str::to_string),
            api_url: DEFAULT_GEMINI_API_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        },
    }
}

/// Canned model backend that counts outbound calls.
pub struct StubModel {
    reply: Result<Value, (u16, String)>,
    calls: AtomicUsize,
}

impl StubModel {
    /// Reply with the given raw envelope.
    pub fn envelope(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            calls: AtomicUsize::new(0),
        })
    }

    /// Reply with a single candidate carrying `text`.
    pub fn text(text: &str) -> Arc<Self> {
        Self::envelope(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        }))
    }

    /// Fail with an upstream HTTP error.
    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, body.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerateContent for StubModel {
    async fn generate_content(
        &self,
        _api_key: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
            Err((status, body)) => Err(GeminiApiError::ApiError {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Build the full application router with all middleware layers, backed by
/// the bundled catalog and the given model stub.
///
/// Uses the same `build_app_router` as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app_with(model: Arc<StubModel>, api_key: Option<&str>) -> Router {
    let config = test_config(api_key);
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(Catalog::bundled().unwrap()),
        analyzer: RoomAnalyzer::new(model),
    };
    build_app_router(state, &config)
}

/// Test app with `TEST_API_KEY` configured.
pub fn build_test_app(model: Arc<StubModel>) -> Router {
    build_test_app_with(model, Some(TEST_API_KEY))
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
