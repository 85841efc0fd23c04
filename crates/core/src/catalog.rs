//! Static product catalog.
//!
//! The catalog is a read-only list of products loaded once at startup,
//! either from the JSON bundled into the binary or from a file with the
//! same `{ "products": [...] }` shape.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Catalog compiled into the binary.
pub const BUNDLED_CATALOG_JSON: &str = include_str!("../data/products.json");

/// A purchasable furniture item with its 3D/AR preview assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Furniture category, matched case-insensitively by recommendations.
    pub category: String,
    pub description: String,
    /// Product photo reference.
    pub image: String,
    /// 3D model (glTF binary) reference for the viewer and AR preview.
    pub model_url: String,
    /// Human-readable dimensions, e.g. `"210 x 92 x 84 cm"`.
    pub dimensions: String,
    pub material: String,
    pub style: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Ordered, immutable product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-parsed products.
    ///
    /// Rejects duplicate product ids.
    pub fn new(products: Vec<Product>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate product id in catalog: {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from `{ "products": [...] }` JSON.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid catalog JSON: {e}")))?;
        Self::new(file.products)
    }

    /// The catalog bundled into the binary.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_CATALOG_JSON)
    }

    /// Load a catalog file from disk.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by id, failing with [`CoreError::NotFound`].
    pub fn get(&self, id: &str) -> Result<&Product, CoreError> {
        self.find(id).ok_or_else(|| CoreError::NotFound {
            entity: "Product",
            id: id.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
