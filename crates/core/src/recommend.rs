//! Category-based product recommendations.
//!
//! A plain filter: no ranking, no scoring. Products keep catalog order.

use crate::catalog::Product;
use crate::error::CoreError;

/// Number of catalog entries returned when no product matches.
pub const FALLBACK_PRODUCT_COUNT: usize = 4;

/// Select products whose category matches any requested category.
///
/// Matching is case-insensitive. Each product appears at most once, in
/// catalog order. If nothing matches, the first [`FALLBACK_PRODUCT_COUNT`]
/// products are returned so the caller never shows an empty list.
pub fn recommend_products<'a, S: AsRef<str>>(
    categories: &[S],
    products: &'a [Product],
) -> Vec<&'a Product> {
    let wanted: Vec<String> = categories
        .iter()
        .map(|cat| cat.as_ref().to_lowercase())
        .collect();

    let matched: Vec<&Product> = products
        .iter()
        .filter(|product| wanted.contains(&product.category.to_lowercase()))
        .collect();

    if matched.is_empty() {
        products.iter().take(FALLBACK_PRODUCT_COUNT).collect()
    } else {
        matched
    }
}

/// Decode the `categories` navigation parameter (a JSON array of strings).
///
/// The parameter travels through the browser URL and is untrusted; callers
/// treat an error as "no usable categories".
pub fn parse_categories_param(raw: &str) -> Result<Vec<String>, CoreError> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid categories parameter: {e}")))
}
