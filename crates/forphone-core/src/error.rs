//! # Error Types
//!
//! Domain-specific error types for forphone-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  forphone-core errors (this file)                                      │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  forphone-storage errors (separate crate)                              │
//! │  └── StorageError     - Key-value slot read/write failures             │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  ├── PersistenceError - Swallowed, logged, never fatal                 │
//! │  └── ApiError         - What the shell shows the shopper               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A line index does not address an item in the current cart.
    ///
    /// ## When This Occurs
    /// - The shell holds a stale rendering and removes a line that is gone
    /// - A caller passes an index past the end of the cart
    #[error("Cart line {index} does not exist (cart has {len} lines)")]
    OutOfRange { index: usize, len: usize },

    /// Two line items share a product id.
    ///
    /// Only reachable when rebuilding a cart from outside data; `add_item`
    /// merges instead.
    #[error("Duplicate line item for product {0}")]
    DuplicateLineItem(ProductId),

    /// Incrementing the quantity would overflow.
    #[error("Quantity for product {0} cannot grow any further")]
    QuantityOverflow(ProductId),

    /// Another unit of the product would push the grand total past what
    /// `Money` can hold.
    #[error("Cart total {0} cannot grow any further")]
    TotalOverflow(Money),

    /// A line item carries values no cart can hold.
    #[error("Invalid line item for product {id}: {reason}")]
    InvalidLineItem { id: ProductId, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed email, card number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
