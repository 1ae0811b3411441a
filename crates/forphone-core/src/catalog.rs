//! # Catalog
//!
//! The fixed list of phones the storefront sells, plus brand filtering.
//!
//! ```text
//! products all      ──► CatalogFilter::All            ──► 7 phones
//! products samsung  ──► CatalogFilter::Brand(Samsung) ──► ids 3, 4
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Brand, Product, ProductId};

// =============================================================================
// Catalog Filter
// =============================================================================

/// Which products the product grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    Brand(Brand),
}

impl CatalogFilter {
    /// Returns true if the product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::Brand(brand) => product.brand == *brand,
        }
    }
}

impl fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogFilter::All => f.write_str("all"),
            CatalogFilter::Brand(brand) => write!(f, "{}", brand),
        }
    }
}

/// Serialized the way the shopper types it: `"all"` or a brand name.
impl Serialize for CatalogFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for CatalogFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CatalogFilter::All);
        }

        s.parse::<Brand>()
            .map(CatalogFilter::Brand)
            .map_err(|_| ValidationError::NotAllowed {
                field: "filter".to_string(),
                allowed: std::iter::once("all")
                    .chain(Brand::ALL.iter().map(|b| b.as_str()))
                    .map(str::to_string)
                    .collect(),
            })
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// An ordered, immutable product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The storefront's phone line-up.
    pub fn default_phones() -> Self {
        Catalog::new(vec![
            Product::new(1, "iPhone 17 Pro Max", Money::from_major(1199), Brand::Apple, "iphone17.jpg"),
            Product::new(2, "iPhone 17", Money::from_major(999), Brand::Apple, "iphone17.jpg"),
            Product::new(3, "Samsung Galaxy S26 Ultra", Money::from_major(1299), Brand::Samsung, "samsung-s26.jpg"),
            Product::new(4, "Samsung Galaxy S26", Money::from_major(999), Brand::Samsung, "samsung-s26.jpg"),
            Product::new(5, "Google Pixel 10 Pro", Money::from_major(1099), Brand::Google, "pixel10.jpg"),
            Product::new(6, "Google Pixel 10", Money::from_major(899), Brand::Google, "pixel10.jpg"),
            Product::new(7, "OnePlus 12 Pro", Money::from_major(899), Brand::OnePlus, "oneplus12.jpg"),
        ])
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CatalogFilter) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::default_phones()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = Catalog::default_phones();
        assert_eq!(catalog.len(), 7);

        let galaxy = catalog.get(ProductId::new(3)).unwrap();
        assert_eq!(galaxy.name, "Samsung Galaxy S26 Ultra");
        assert_eq!(galaxy.price, Money::from_major(1299));
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_filter_by_brand_keeps_order() {
        let catalog = Catalog::default_phones();
        let filter = CatalogFilter::Brand(Brand::Google);
        let ids: Vec<u32> = catalog.filter(&filter).map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_filter_all() {
        let catalog = Catalog::default_phones();
        assert_eq!(catalog.filter(&CatalogFilter::All).count(), catalog.len());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<CatalogFilter>().unwrap(), CatalogFilter::All);
        assert_eq!("".parse::<CatalogFilter>().unwrap(), CatalogFilter::All);
        assert_eq!(
            "Samsung".parse::<CatalogFilter>().unwrap(),
            CatalogFilter::Brand(Brand::Samsung)
        );

        let err = "nokia".parse::<CatalogFilter>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { ref allowed, .. } if allowed.len() == 5));
    }
}
