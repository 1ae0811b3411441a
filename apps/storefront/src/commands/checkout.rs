//! # Checkout Commands
//!
//! Turns the cart into an order confirmation. No payment is taken: the card
//! number is only checked for shape and never stored.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(cart, form, now)                                           │
//! │      │                                                                  │
//! │      ├── cart empty ─────────────► Err(EMPTY_CART "Cart is empty!")     │
//! │      │                                                                  │
//! │      ├── form invalid ───────────► Err(VALIDATION_ERROR), cart kept     │
//! │      │                                                                  │
//! │      └── ok ──► snapshot lines + totals                                 │
//! │                 clear the cart (saved, CartChanged emitted)             │
//! │                 return OrderConfirmation { order_id, ... }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use forphone_core::validation::{
    validate_card_number, validate_email, validate_required, ValidationResult,
};
use forphone_core::{CartLineView, CartTotals};
use forphone_storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::CartStore;

/// Message shown once an order is placed.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// The checkout form as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub card_number: String,
}

impl CheckoutForm {
    /// Checks every field, stopping at the first problem.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_email(&self.email)?;
        validate_required("address", &self.address)?;
        validate_card_number(&self.card_number)?;
        Ok(())
    }

    /// Last four digits of the card, for the confirmation.
    fn card_last4(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

/// What the shopper sees after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub card_last4: String,
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
    pub message: String,
}

/// Checks that checkout can start.
///
/// ## Errors
/// `EmptyCart` when there is nothing to buy.
pub fn begin_checkout<S: KeyValueStore>(cart: &CartStore<S>) -> Result<CartTotals, ApiError> {
    debug!("begin_checkout command");

    if cart.is_empty() {
        return Err(ApiError::empty_cart());
    }
    Ok(cart.totals())
}

/// Places the order and empties the cart.
pub fn place_order<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    form: &CheckoutForm,
    now: DateTime<Utc>,
) -> Result<OrderConfirmation, ApiError> {
    debug!("place_order command");

    begin_checkout(cart)?;
    form.validate()?;

    let view = cart.view();
    let confirmation = OrderConfirmation {
        order_id: Uuid::new_v4(),
        placed_at: now,
        customer_name: form.name.trim().to_string(),
        card_last4: form.card_last4(),
        lines: view.lines,
        totals: view.totals,
        message: ORDER_PLACED_MESSAGE.to_string(),
    };

    cart.clear();

    info!(
        order_id = %confirmation.order_id,
        items = confirmation.totals.item_count,
        total = %confirmation.totals.grand_total,
        "Order placed"
    );
    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use forphone_core::{Money, ProductId};
    use forphone_storage::MemoryStore;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 Analytical Row".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
        }
    }

    fn cart_with_phone() -> CartStore<MemoryStore> {
        let mut cart = CartStore::new(MemoryStore::new());
        cart.add(ProductId::new(2), "iPhone 17", Money::from_major(999)).unwrap();
        cart.add(ProductId::new(2), "iPhone 17", Money::from_major(999)).unwrap();
        cart
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut cart = CartStore::new(MemoryStore::new());

        let err = begin_checkout(&cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.message, "Cart is empty!");

        let err = place_order(&mut cart, &valid_form(), Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut cart = cart_with_phone();
        let now = Utc::now();

        let confirmation = place_order(&mut cart, &valid_form(), now).unwrap();

        assert_eq!(confirmation.placed_at, now);
        assert_eq!(confirmation.customer_name, "Ada Lovelace");
        assert_eq!(confirmation.card_last4, "4242");
        assert_eq!(confirmation.lines.len(), 1);
        assert_eq!(confirmation.totals.grand_total, Money::from_major(1998));
        assert!(cart.is_empty());
        assert_eq!(
            cart.storage().get(cart.key()).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_invalid_form_keeps_cart() {
        let mut cart = cart_with_phone();

        let form = CheckoutForm {
            email: "ada-at-example".to_string(),
            ..valid_form()
        };
        let err = place_order(&mut cart, &form, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let form = CheckoutForm {
            card_number: "1234".to_string(),
            ..valid_form()
        };
        assert!(place_order(&mut cart, &form, Utc::now()).is_err());

        let form = CheckoutForm {
            address: "  ".to_string(),
            ..valid_form()
        };
        assert!(place_order(&mut cart, &form, Utc::now()).is_err());

        assert_eq!(cart.totals().item_count, 2);
    }

    #[test]
    fn test_order_ids_are_unique() {
        let mut first = cart_with_phone();
        let mut second = cart_with_phone();

        let a = place_order(&mut first, &valid_form(), Utc::now()).unwrap();
        let b = place_order(&mut second, &valid_form(), Utc::now()).unwrap();
        assert_ne!(a.order_id, b.order_id);
    }
}
