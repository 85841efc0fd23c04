//! Handler for the room photo analysis endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use roomfit_core::analysis::RoomAnalysis;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /analyze-room`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRoomRequest {
    /// Base64 image, optionally with a `data:image/...;base64,` prefix.
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// POST /api/v1/analyze-room
///
/// Sends the photo to the model API once and returns the validated
/// analysis as a bare JSON object. A missing image is rejected before any
/// outbound call is made.
pub async fn analyze_room(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRoomRequest>, JsonRejection>,
) -> AppResult<Json<RoomAnalysis>> {
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let image = input.image_base64.unwrap_or_default();

    let analysis = state
        .analyzer
        .analyze(state.config.gemini.api_key.as_deref(), &image)
        .await?;

    Ok(Json(analysis))
}
