//! Route definitions for room analysis.

use axum::routing::post;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Analysis routes mounted at the API root.
///
/// ```text
/// POST   /analyze-room      -> analyze_room
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/analyze-room", post(analysis::analyze_room))
}
