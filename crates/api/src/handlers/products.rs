//! Handlers for the product catalog and category recommendations.

use axum::extract::{Path, Query, State};
use axum::Json;
use roomfit_core::catalog::Product;
use roomfit_core::recommend::{parse_categories_param, recommend_products};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /recommendations`.
#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    /// JSON array of category names, as produced by the analysis page.
    pub categories: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products
///
/// Returns the full catalog in catalog order.
pub async fn list_products(State(state): State<AppState>) -> Json<DataResponse<Vec<Product>>> {
    Json(DataResponse {
        data: state.catalog.products().to_vec(),
    })
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = state.catalog.get(&id)?.clone();
    Ok(Json(DataResponse { data: product }))
}

/// GET /api/v1/recommendations?categories=["seating","lighting"]
///
/// Filters the catalog by the requested categories. The parameter comes
/// from a browser URL, so a missing or unreadable value falls back to the
/// full catalog instead of failing.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> Json<DataResponse<Vec<Product>>> {
    let products = state.catalog.products();

    let categories = match params.categories.as_deref().map(parse_categories_param) {
        None => None,
        Some(Ok(categories)) => Some(categories),
        Some(Err(err)) => {
            tracing::warn!(error = %err, "Ignoring unreadable categories parameter");
            None
        }
    };

    let data = match categories {
        Some(categories) => recommend_products(&categories, products)
            .into_iter()
            .cloned()
            .collect(),
        None => products.to_vec(),
    };

    Json(DataResponse { data })
}
