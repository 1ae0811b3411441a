//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell line ──► Command Function ──► Result<T, ApiError>                │
//! │                       │                                                 │
//! │                       ├── unknown product ─────► NOT_FOUND              │
//! │                       ├── bad form field ──────► VALIDATION_ERROR       │
//! │                       ├── stale line index ────► CART_ERROR             │
//! │                       ├── checkout, no items ──► EMPTY_CART             │
//! │                       └── anything else ───────► INTERNAL               │
//! │                                                                         │
//! │  The shell prints `message`; a browser front end would switch on        │
//! │  `code`.                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence failures never show up here: the cart store swallows them.

use forphone_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Checkout attempted with nothing in the cart
    EmptyCart,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// The error shown when checking out an empty cart.
    pub fn empty_cart() -> Self {
        ApiError::new(ErrorCode::EmptyCart, "Cart is empty!")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OutOfRange { index, len } => ApiError::cart(format!(
                "There is no cart line {} (the cart has {} lines)",
                index, len
            )),
            CoreError::QuantityOverflow(id) => {
                ApiError::cart(format!("Cannot add any more of product {}", id))
            }
            CoreError::TotalOverflow(_) => ApiError::cart("The cart total is too large"),
            CoreError::DuplicateLineItem(_) | CoreError::InvalidLineItem { .. } => {
                tracing::error!("Unexpected cart state: {}", err);
                ApiError::internal("Cart is in an unexpected state")
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use forphone_core::{Money, ProductId};

    #[test]
    fn test_serializes_code_and_message() {
        let json = serde_json::to_string(&ApiError::empty_cart()).unwrap();
        assert_eq!(json, r#"{"code":"EMPTY_CART","message":"Cart is empty!"}"#);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::OutOfRange { index: 3, len: 1 }.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::TotalOverflow(Money::from_cents(i64::MAX)).into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::DuplicateLineItem(ProductId::new(1)).into();
        assert_eq!(err.code, ErrorCode::Internal);

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_display() {
        let err = ApiError::not_found("Product", "42");
        assert_eq!(err.to_string(), "[NotFound] Product not found: 42");
    }
}
