//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                  │             │
//! │       │           add_to_cart                             │             │
//! │       │           remove_from_cart                        │             │
//! │       │                │                                  │             │
//! │       │                ▼                                  │             │
//! │       └────────── clear_cart ◄────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command saves the cart through the `CartStore`; a failed
//! save is logged there and does not fail the command.

use forphone_core::{CartLineView, CartTotals, CartView, Catalog, ProductId};
use forphone_storage::KeyValueStore;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartStore;

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        CartResponse {
            lines: view.lines,
            totals: view.totals,
        }
    }
}

impl<S: KeyValueStore> From<&CartStore<S>> for CartResponse {
    fn from(cart: &CartStore<S>) -> Self {
        CartResponse::from(cart.view())
    }
}

/// Gets the current cart contents.
///
/// ## Cart Display
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  [0] iPhone 17                  x2    $999.00     $1998.00     │
/// │  [1] Samsung Galaxy S26 Ultra   x1    $1299.00    $1299.00     │
/// ├────────────────────────────────────────────────────────────────┤
/// │  3 items                                  Total:  $3297.00     │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart<S: KeyValueStore>(cart: &CartStore<S>) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(cart)
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases
/// - Product not in cart: added as a new line with its current name and price
///
/// ## Errors
/// `NotFound` if the catalog has no such product.
pub fn add_to_cart<S: KeyValueStore>(
    catalog: &Catalog,
    cart: &mut CartStore<S>,
    product_id: u32,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_to_cart command");

    let product = catalog
        .get(ProductId::new(product_id))
        .ok_or_else(|| ApiError::not_found("Product", &product_id.to_string()))?;

    cart.add(product.id, &product.name, product.price)?;
    Ok(CartResponse::from(&*cart))
}

/// Removes the cart line at `index` (as numbered by `get_cart`).
///
/// ## Errors
/// `CartError` if no such line exists.
pub fn remove_from_cart<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    index: usize,
) -> Result<CartResponse, ApiError> {
    debug!(index, "remove_from_cart command");

    let removed = cart.remove(index)?;
    debug!(product_id = %removed.id, "Removed cart line");
    Ok(CartResponse::from(&*cart))
}

/// Clears all items from the cart.
pub fn clear_cart<S: KeyValueStore>(cart: &mut CartStore<S>) -> CartResponse {
    debug!("clear_cart command");
    cart.clear();
    CartResponse::from(&*cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use forphone_core::Money;
    use forphone_storage::MemoryStore;

    fn setup() -> (Catalog, CartStore<MemoryStore>) {
        (Catalog::default_phones(), CartStore::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_to_cart_uses_catalog_data() {
        let (catalog, mut cart) = setup();

        add_to_cart(&catalog, &mut cart, 2).unwrap();
        let response = add_to_cart(&catalog, &mut cart, 2).unwrap();

        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].name, "iPhone 17");
        assert_eq!(response.lines[0].quantity, 2);
        assert_eq!(response.lines[0].subtotal, Money::from_major(1998));
        assert_eq!(response.totals.item_count, 2);
    }

    #[test]
    fn test_add_unknown_product() {
        let (catalog, mut cart) = setup();
        let err = add_to_cart(&catalog, &mut cart, 42).unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_from_cart() {
        let (catalog, mut cart) = setup();
        add_to_cart(&catalog, &mut cart, 1).unwrap();
        add_to_cart(&catalog, &mut cart, 3).unwrap();

        let response = remove_from_cart(&mut cart, 0).unwrap();
        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].index, 0);
        assert_eq!(response.lines[0].name, "Samsung Galaxy S26 Ultra");

        let err = remove_from_cart(&mut cart, 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_clear_and_get_cart() {
        let (catalog, mut cart) = setup();
        add_to_cart(&catalog, &mut cart, 7).unwrap();

        let response = clear_cart(&mut cart);
        assert!(response.lines.is_empty());
        assert_eq!(response.totals.grand_total, Money::zero());
        assert_eq!(get_cart(&cart), response);
    }
}
