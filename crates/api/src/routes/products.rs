//! Route definitions for the product catalog.
//!
//! Two routers are provided:
//! - `router()` for catalog routes mounted at `/products`
//! - `recommendations_router()` for the category filter at the API root

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Catalog routes mounted at `/products`.
///
/// ```text
/// GET    /                  -> list_products
/// GET    /{id}              -> get_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_products))
        .route("/{id}", get(products::get_product))
}

/// Recommendation route mounted at the API root.
///
/// ```text
/// GET    /recommendations   -> recommendations
/// ```
pub fn recommendations_router() -> Router<AppState> {
    Router::new().route("/recommendations", get(products::recommendations))
}
