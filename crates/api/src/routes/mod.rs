pub mod analysis;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /analyze-room                                    room photo analysis (POST)
///
/// /products                                        full catalog (GET)
/// /products/{id}                                   single product (GET)
///
/// /recommendations?categories=<json array>         category filter (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(analysis::router())
        .nest("/products", products::router())
        .merge(products::recommendations_router())
}
