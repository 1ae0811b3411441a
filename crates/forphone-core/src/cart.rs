//! # Cart
//!
//! The pure cart model: line items, merge-on-add, bounds-checked removal and
//! derived totals. Persistence and notifications live one level up, in the
//! storefront's `CartStore`.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_item(id, name, price)                                              │
//! │      ├── id already present ──► items[i].quantity += 1                  │
//! │      └── new id ──────────────► items.push(quantity = 1)                │
//! │                                                                         │
//! │  remove_at(index)                                                       │
//! │      ├── index < len ─────────► items.remove(index)                     │
//! │      └── otherwise ───────────► Err(OutOfRange), cart untouched         │
//! │                                                                         │
//! │  clear() ─────────────────────► items.clear()                           │
//! │                                                                         │
//! │  totals() / lines() / view() ─► recomputed on every call                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ProductId;
use crate::validation::{validate_line_name, validate_price};

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with an aggregated quantity.
///
/// Name and price are copied from the product when first added and are not
/// refreshed on later adds of the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a line item with quantity 1.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        CartLineItem {
            id,
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Sum of quantities across all line items.
    pub item_count: u64,
    /// Sum of price × quantity across all line items.
    pub grand_total: Money,
}

/// A line item as the presentation layer renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineView {
    /// Position in the cart; pass it back to remove this line.
    pub index: usize,
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub subtotal: Money,
}

/// Everything needed to redraw the cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line item per product id (adding the same id merges)
/// - Every quantity is at least 1
/// - Every price is non-negative
/// - Line order is the order of first add
/// - Every subtotal and the grand total fit in `Money`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from previously saved line items.
    ///
    /// ## Errors
    /// - `DuplicateLineItem` if two items share an id
    /// - `InvalidLineItem` for a zero quantity, a negative price or a
    ///   subtotal too large for `Money`
    /// - `TotalOverflow` if the lines together overflow the grand total
    pub fn from_items(items: Vec<CartLineItem>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut total = Money::zero();

        for item in &items {
            if !seen.insert(item.id) {
                return Err(CoreError::DuplicateLineItem(item.id));
            }
            if item.quantity == 0 {
                return Err(CoreError::InvalidLineItem {
                    id: item.id,
                    reason: "quantity must be at least 1".to_string(),
                });
            }
            if item.price.is_negative() {
                return Err(CoreError::InvalidLineItem {
                    id: item.id,
                    reason: "price must not be negative".to_string(),
                });
            }

            let subtotal = item
                .price
                .checked_multiply_quantity(item.quantity)
                .ok_or_else(|| CoreError::InvalidLineItem {
                    id: item.id,
                    reason: "subtotal is too large".to_string(),
                })?;
            total = total
                .checked_add(subtotal)
                .ok_or(CoreError::TotalOverflow(total))?;
        }

        Ok(Cart { items })
    }

    /// Adds one unit of a product, or increases its quantity if already
    /// present.
    ///
    /// ## Errors
    /// - `Validation` for an empty name or a negative price (nothing changes)
    /// - `QuantityOverflow` if the line is already at `u32::MAX`
    /// - `TotalOverflow` if one more unit would overflow the grand total
    pub fn add_item(&mut self, id: ProductId, name: &str, price: Money) -> CoreResult<()> {
        validate_line_name(name)?;
        validate_price(price)?;

        let total = self.totals().grand_total;

        // A merged line keeps its first price, so that is what one more unit
        // adds. No subtotal can exceed the grand total.
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            let quantity = item
                .quantity
                .checked_add(1)
                .ok_or(CoreError::QuantityOverflow(id))?;
            if total.checked_add(item.price).is_none() {
                return Err(CoreError::TotalOverflow(total));
            }
            item.quantity = quantity;
            return Ok(());
        }

        if total.checked_add(price).is_none() {
            return Err(CoreError::TotalOverflow(total));
        }
        self.items.push(CartLineItem::new(id, name.trim(), price));
        Ok(())
    }

    /// Removes the line at `index` and returns it.
    pub fn remove_at(&mut self, index: usize) -> CoreResult<CartLineItem> {
        if index >= self.items.len() {
            return Err(CoreError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        Ok(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item count and grand total.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.items.iter().map(|i| u64::from(i.quantity)).sum(),
            grand_total: self.items.iter().map(CartLineItem::subtotal).sum(),
        }
    }

    /// Line items with their subtotals, ready to render.
    pub fn lines(&self) -> Vec<CartLineView> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| CartLineView {
                index,
                id: item.id,
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
                subtotal: item.subtotal(),
            })
            .collect()
    }

    /// Lines and totals together.
    pub fn view(&self) -> CartView {
        CartView {
            lines: self.lines(),
            totals: self.totals(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
