//! End-to-end room analysis: build request, call the model, normalize.

use std::sync::Arc;

use roomfit_core::analysis::RoomAnalysis;
use roomfit_core::error::AnalysisError;
use roomfit_core::normalizer::normalize_detailed;

use crate::api::GenerateContent;
use crate::request::{build_analysis_request, MAX_OUTPUT_TOKENS};

/// Runs the analysis pipeline against a [`GenerateContent`] backend.
///
/// Stateless apart from the shared backend handle; every call rebuilds the
/// analysis from scratch.
#[derive(Clone)]
pub struct RoomAnalyzer {
    model: Arc<dyn GenerateContent>,
}

impl RoomAnalyzer {
    pub fn new(model: Arc<dyn GenerateContent>) -> Self {
        Self { model }
    }

    /// Analyze a base64-encoded room photo.
    ///
    /// Checks run in order: image present, credential present, one upstream
    /// call, envelope extraction, normalization. Nothing is sent upstream
    /// unless both the image and the credential are present.
    pub async fn analyze(
        &self,
        api_key: Option<&str>,
        image_base64: &str,
    ) -> Result<RoomAnalysis, AnalysisError> {
        let request = build_analysis_request(image_base64)?;

        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(AnalysisError::MissingCredential)?;

        tracing::info!("Sending room analysis request to model API");
        let response = self
            .model
            .generate_content(api_key, &request)
            .await
            .map_err(AnalysisError::from)
            .inspect_err(|err| match err {
                AnalysisError::UpstreamHttp { status, body } => {
                    tracing::error!(status, body = %body, "Model API returned an error");
                }
                other => tracing::error!(error = %other, "Model API request failed"),
            })?;

        let candidate = response.first_candidate().inspect_err(|_| {
            tracing::error!("Model reply contained no candidates");
        })?;
        if candidate.is_truncated() {
            tracing::warn!(
                max_output_tokens = MAX_OUTPUT_TOKENS,
                "Model reply truncated at output-token ceiling"
            );
        }
        let text = candidate.text().ok_or_else(|| {
            tracing::error!("Model reply candidate contained no text");
            AnalysisError::EmptyContent
        })?;
        tracing::debug!(content = %text, "Raw model reply");

        match normalize_detailed(&text) {
            Ok(normalized) => {
                for failure in &normalized.failed {
                    tracing::debug!(
                        strategy = failure.strategy.as_str(),
                        error = %failure.error,
                        "Normalizer strategy failed"
                    );
                }
                tracing::info!(
                    strategy = normalized.strategy.as_str(),
                    "Room analysis normalized"
                );
                Ok(normalized.analysis)
            }
            Err(failure) => {
                for f in &failure.failed {
                    tracing::debug!(
                        strategy = f.strategy.as_str(),
                        error = %f.error,
                        "Normalizer strategy failed"
                    );
                }
                tracing::error!(error = %failure.error, content = %text, "Failed to normalize model reply");
                Err(failure.error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::api::GeminiApiError;
    use crate::request::{GenerateContentRequest, Part};
    use crate::response::GenerateContentResponse;

    /// Canned backend that records how it was called.
    struct StubModel {
        reply: Result<serde_json::Value, (u16, String)>,
        calls: AtomicUsize,
        last_key: Mutex<Option<String>>,
        last_request: Mutex<Option<GenerateContentRequest>>,
    }

    impl StubModel {
        fn replying(reply: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply),
                calls: AtomicUsize::new(0),
                last_key: Mutex::new(None),
                last_request: Mutex::new(None),
            })
        }

        fn text(text: &str) -> Arc<Self> {
            Self::replying(json!({
                "candidates": [{ "content": { "parts": [{ "text": text }] }, "finishReason": "STOP" }]
            }))
        }

        fn failing(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err((status, body.to_string())),
                calls: AtomicUsize::new(0),
                last_key: Mutex::new(None),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl GenerateContent for StubModel {
        async fn generate_content(
            &self,
            api_key: &str,
            request: &GenerateContentRequest,
        ) -> Result<GenerateContentResponse, GeminiApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_key.lock().unwrap() = Some(api_key.to_string());
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
                Err((status, body)) => Err(GeminiApiError::ApiError {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }
    }

    const LIVING_ROOM: &str = r#"{"description":"A bright living room.","style":"scandinavian","colors":["white","beige","oak"],"categories":["seating","lighting"]}"#;

    #[tokio::test]
    async fn fenced_reply_is_normalized() {
        let stub = StubModel::text(&format!("```json\n{LIVING_ROOM}\n```"));
        let analyzer = RoomAnalyzer::new(stub.clone());

        let analysis = analyzer.analyze(Some("key-123"), "aGVsbG8=").await.unwrap();

        assert_eq!(analysis.style, "scandinavian");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert_eq!(stub.last_key.lock().unwrap().as_deref(), Some("key-123"));
    }

    #[tokio::test]
    async fn data_url_prefix_never_reaches_upstream() {
        let stub = StubModel::text(LIVING_ROOM);
        let analyzer = RoomAnalyzer::new(stub.clone());

        analyzer
            .analyze(Some("key"), "data:image/png;base64,aGVsbG8=")
            .await
            .unwrap();

        let request = stub.last_request.lock().unwrap().clone().unwrap();
        assert_matches!(
            &request.contents[0].parts[1],
            Part::InlineData { inline_data }
                if inline_data.data == "aGVsbG8=" && inline_data.mime_type == "image/png"
        );
    }

    #[tokio::test]
    async fn missing_image_makes_no_call() {
        let stub = StubModel::text(LIVING_ROOM);
        let analyzer = RoomAnalyzer::new(stub.clone());

        assert_matches!(
            analyzer.analyze(Some("key"), "").await,
            Err(AnalysisError::MissingInput)
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_image_is_reported_before_missing_key() {
        let stub = StubModel::text(LIVING_ROOM);
        let analyzer = RoomAnalyzer::new(stub);
        assert_matches!(analyzer.analyze(None, "").await, Err(AnalysisError::MissingInput));
    }

    #[tokio::test]
    async fn missing_or_blank_key_makes_no_call() {
        let stub = StubModel::text(LIVING_ROOM);
        let analyzer = RoomAnalyzer::new(stub.clone());

        assert_matches!(
            analyzer.analyze(None, "aGVsbG8=").await,
            Err(AnalysisError::MissingCredential)
        );
        assert_matches!(
            analyzer.analyze(Some("  "), "aGVsbG8=").await,
            Err(AnalysisError::MissingCredential)
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_status_and_body_are_kept() {
        let stub = StubModel::failing(503, "model overloaded");
        let analyzer = RoomAnalyzer::new(stub);

        assert_matches!(
            analyzer.analyze(Some("key"), "aGVsbG8=").await,
            Err(AnalysisError::UpstreamHttp { status: 503, body }) if body == "model overloaded"
        );
    }

    #[tokio::test]
    async fn empty_envelope_kinds_are_distinct() {
        let no_candidates = RoomAnalyzer::new(StubModel::replying(json!({ "candidates": [] })));
        assert_matches!(
            no_candidates.analyze(Some("key"), "aGVsbG8=").await,
            Err(AnalysisError::EmptyCandidate)
        );

        let no_text = RoomAnalyzer::new(StubModel::replying(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })));
        assert_matches!(
            no_text.analyze(Some("key"), "aGVsbG8=").await,
            Err(AnalysisError::EmptyContent)
        );
    }

    #[tokio::test]
    async fn truncated_reply_is_a_parse_error() {
        let analyzer = RoomAnalyzer::new(StubModel::replying(json!({
            "candidates": [{
                "content": { "parts": [{ "text": &LIVING_ROOM[..70] }] },
                "finishReason": "MAX_TOKENS"
            }]
        })));
        assert_matches!(
            analyzer.analyze(Some("key"), "aGVsbG8=").await,
            Err(AnalysisError::JsonParse(_))
        );
    }

    #[tokio::test]
    async fn incomplete_object_is_a_schema_violation() {
        let analyzer = RoomAnalyzer::new(StubModel::text(
            r#"{"description":"A room.","style":"modern","colors":[],"categories":["seating"]}"#,
        ));
        assert_matches!(
            analyzer.analyze(Some("key"), "aGVsbG8=").await,
            Err(AnalysisError::SchemaViolation { .. })
        );
    }
}
