//! # forphone-core: Pure Business Logic for the ForPhone Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart rules,
//! the product catalog and money math as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ForPhone Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation (storefront shell)                  │   │
//! │  │    Catalog ──► Cart ──► Checkout ──► Toasts                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          CartStore (persists, notifies subscribers)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ forphone-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │   Brand   │  │  (cents)  │  │  Totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Brand, Product)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The phone catalog and brand filtering
//! - [`cart`] - Cart line items, merge rules and derived totals
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use forphone_core::{Cart, Money, ProductId};
//!
//! let mut cart = Cart::new();
//! cart.add_item(ProductId::new(2), "iPhone 17", Money::from_major(999)).unwrap();
//! cart.add_item(ProductId::new(2), "iPhone 17", Money::from_major(999)).unwrap();
//!
//! let totals = cart.totals();
//! assert_eq!(totals.item_count, 2);
//! assert_eq!(totals.grand_total.to_string(), "$1998.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartLineView, CartTotals, CartView};
pub use catalog::{Catalog, CatalogFilter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product or line item name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Accepted conditions for a phone offered through the sell form.
pub const LISTING_CONDITIONS: [&str; 4] = ["new", "like-new", "good", "fair"];
