use std::sync::Arc;

use roomfit_core::catalog::Catalog;
use roomfit_gemini::analyzer::RoomAnalyzer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Nothing in it is
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the model API key.
    pub config: Arc<ServerConfig>,
    /// Read-only product catalog.
    pub catalog: Arc<Catalog>,
    /// Room analysis pipeline.
    pub analyzer: RoomAnalyzer,
}
