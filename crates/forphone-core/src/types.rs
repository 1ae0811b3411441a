//! # Domain Types
//!
//! Reference data shared by the catalog and the cart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    ProductId    │   │     Brand       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  u32            │   │  Apple          │       │
//! │  │  name           │   │  (catalog key)  │   │  Samsung        │       │
//! │  │  price (Money)  │   └─────────────────┘   │  Google         │       │
//! │  │  brand, image   │                         │  OnePlus        │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable. The cart never holds a `Product`; it copies the
//! `(id, name, price)` triple at the moment an item is added.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Brand
// =============================================================================

/// Phone manufacturer, used for catalog filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Apple,
    Samsung,
    Google,
    OnePlus,
}

impl Brand {
    /// Every brand, in catalog display order.
    pub const ALL: [Brand; 4] = [Brand::Apple, Brand::Samsung, Brand::Google, Brand::OnePlus];

    /// Lowercase key used in filters and listings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Brand::Apple => "apple",
            Brand::Samsung => "samsung",
            Brand::Google => "google",
            Brand::OnePlus => "oneplus",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Brand::ALL
            .into_iter()
            .find(|b| b.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "brand".to_string(),
                allowed: Brand::ALL.iter().map(|b| b.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A phone offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name shown on the product card and in the cart.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Manufacturer.
    pub brand: Brand,

    /// Image reference (file name under the storefront's image folder).
    pub image: String,
}

impl Product {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: Money,
        brand: Brand,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: ProductId::new(id),
            name: name.into(),
            price,
            brand,
            image: image.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_from_str() {
        assert_eq!("apple".parse::<Brand>().unwrap(), Brand::Apple);
        assert_eq!(" OnePlus ".parse::<Brand>().unwrap(), Brand::OnePlus);
        assert!("nokia".parse::<Brand>().is_err());
    }

    #[test]
    fn test_brand_display_round_trips() {
        for brand in Brand::ALL {
            assert_eq!(brand.to_string().parse::<Brand>().unwrap(), brand);
        }
    }

    #[test]
    fn test_product_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
