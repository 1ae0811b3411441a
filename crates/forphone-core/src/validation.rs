//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell                                                         │
//! │  └── Argument splitting and number parsing                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Cart input (names, prices)                                         │
//! │  └── Form input (checkout, sell listing)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persisted cart decode                                         │
//! │  └── Shape checks, reset to empty on mismatch                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use forphone_core::validation::{validate_email, validate_line_name};
//!
//! validate_line_name("iPhone 17").unwrap();
//! assert!(validate_email("not-an-email").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{LISTING_CONDITIONS, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a field is not blank.
///
/// ## Returns
/// The trimmed value.
pub fn validate_required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Validates a cart line or product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use forphone_core::validation::validate_line_name;
///
/// assert!(validate_line_name("Google Pixel 10").is_ok());
/// assert!(validate_line_name("   ").is_err());
/// ```
pub fn validate_line_name(name: &str) -> ValidationResult<()> {
    let name = validate_required("name", name)?;

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an email address shape.
///
/// ## Rules
/// - Exactly one `@`, with text on both sides
/// - The domain part contains a dot that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = validate_required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }

    let dot_ok = domain
        .find('.')
        .map(|pos| pos > 0 && !domain.ends_with('.'))
        .unwrap_or(false);
    if !dot_ok {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Validates a payment card number.
///
/// ## Rules
/// - Spaces and dashes are ignored
/// - Remaining characters must all be digits
/// - 12 to 19 digits
///
/// No payment is taken; this only catches obvious typos.
pub fn validate_card_number(card: &str) -> ValidationResult<()> {
    let card = validate_required("card number", card)?;

    let digits: String = card.chars().filter(|c| !matches!(c, ' ' | '-')).collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(12..=19).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: "must be 12 to 19 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates the condition of a phone offered for sale.
///
/// ## Returns
/// The normalized (lowercase, trimmed) condition.
pub fn validate_listing_condition(condition: &str) -> ValidationResult<String> {
    let condition = validate_required("condition", condition)?.to_lowercase();

    if !LISTING_CONDITIONS.contains(&condition.as_str()) {
        return Err(ValidationError::NotAllowed {
            field: "condition".to_string(),
            allowed: LISTING_CONDITIONS.iter().map(|c| c.to_string()).collect(),
        });
    }

    Ok(condition)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price for the cart.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates the asking price of a sell listing.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_asking_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "asking price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
