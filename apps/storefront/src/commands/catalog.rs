//! # Catalog Commands
//!
//! Product listing with the brand filter buttons of the storefront.

use forphone_core::{Catalog, CatalogFilter, Product};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Products shown for one filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub filter: CatalogFilter,
    pub products: Vec<Product>,
}

/// Lists products, optionally limited to one brand.
///
/// ## Arguments
/// * `filter` - `""`/`all`, or a brand name (`apple`, `samsung`, ...)
///
/// ## Errors
/// `ValidationError` for an unknown brand.
pub fn list_products(catalog: &Catalog, filter: &str) -> Result<ProductListResponse, ApiError> {
    debug!(filter = %filter, "list_products command");

    let filter: CatalogFilter = filter.parse()?;
    let products = catalog.filter(&filter).cloned().collect();

    Ok(ProductListResponse { filter, products })
}
