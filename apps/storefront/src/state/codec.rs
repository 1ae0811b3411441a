//! # Persisted Cart Codec
//!
//! Converts a [`Cart`] to and from the JSON stored in the cart slot.
//!
//! ## Wire Format
//! ```json
//! [
//!   { "id": 2, "name": "iPhone 17", "price": 999, "qty": 2 },
//!   { "id": 3, "name": "Samsung Galaxy S26 Ultra", "price": 1299, "qty": 1 }
//! ]
//! ```
//!
//! - One object per line item, in cart order
//! - `price` is in major units: whole amounts are written as integers,
//!   fractional ones as decimals (`9.99`)
//! - Unknown extra fields are ignored
//!
//! ## Decoding Is All Or Nothing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw slot text                                                          │
//! │      │                                                                  │
//! │      ├── not JSON / not an array / wrong field types ──► Malformed      │
//! │      ├── qty < 1, negative price, blank name ──────────► Malformed      │
//! │      ├── the same id twice ────────────────────────────► Malformed      │
//! │      ├── price × qty or the total overflows Money ─────► Malformed      │
//! │      │                                                                  │
//! │      └── every item valid ─────────────────────────────► Cart           │
//! │                                                                         │
//! │  A single bad item rejects the whole payload; the store then starts     │
//! │  from an empty cart.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use forphone_core::validation::validate_line_name;
use forphone_core::{Cart, CartLineItem, Money, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::cart_store::PersistenceError;

/// One line item exactly as it appears in the slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredLineItem {
    id: u32,
    name: String,
    price: Number,
    qty: u32,
}

// =============================================================================
// Encode
// =============================================================================

/// Serializes the full ordered cart.
pub fn encode(cart: &Cart) -> Result<String, PersistenceError> {
    let stored = cart
        .items()
        .iter()
        .map(|item| {
            Ok(StoredLineItem {
                id: item.id.get(),
                name: item.name.clone(),
                price: price_to_json(item.price)?,
                qty: item.quantity,
            })
        })
        .collect::<Result<Vec<_>, PersistenceError>>()?;

    serde_json::to_string(&stored).map_err(|e| PersistenceError::Encode(e.to_string()))
}

/// Whole-dollar amounts stay integers so the slot reads `999`, not `999.0`.
fn price_to_json(price: Money) -> Result<Number, PersistenceError> {
    if price.cents_part() == 0 {
        return Ok(Number::from(price.dollars()));
    }

    Number::from_f64(price.cents() as f64 / 100.0)
        .ok_or_else(|| PersistenceError::Encode(format!("price {price} is not representable")))
}

// =============================================================================
// Decode
// =============================================================================

/// Parses and validates a stored cart.
///
/// ## Errors
/// `Malformed` describing the first problem found.
pub fn decode(raw: &str) -> Result<Cart, PersistenceError> {
    let stored: Vec<StoredLineItem> =
        serde_json::from_str(raw).map_err(|e| PersistenceError::Malformed(e.to_string()))?;

    let items = stored
        .into_iter()
        .enumerate()
        .map(|(position, item)| to_line_item(position, item))
        .collect::<Result<Vec<_>, _>>()?;

    Cart::from_items(items).map_err(|e| PersistenceError::Malformed(e.to_string()))
}

fn to_line_item(position: usize, item: StoredLineItem) -> Result<CartLineItem, PersistenceError> {
    let malformed = |reason: String| PersistenceError::Malformed(format!("item {position}: {reason}"));

    validate_line_name(&item.name).map_err(|e| malformed(e.to_string()))?;
    let price = price_from_json(&item.price).map_err(malformed)?;

    if item.qty == 0 {
        return Err(malformed("qty must be at least 1".to_string()));
    }

    Ok(CartLineItem {
        id: ProductId::new(item.id),
        name: item.name.trim().to_string(),
        price,
        quantity: item.qty,
    })
}

/// Converts a major-unit JSON number to money, rounding to whole cents.
fn price_from_json(price: &Number) -> Result<Money, String> {
    if let Some(major) = price.as_i64() {
        if major < 0 {
            return Err("price must not be negative".to_string());
        }
        return major
            .checked_mul(100)
            .map(Money::from_cents)
            .ok_or_else(|| "price is too large".to_string());
    }

    if price.is_u64() {
        return Err("price is too large".to_string());
    }

    let major = price
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| "price is not a finite number".to_string())?;

    if major < 0.0 {
        return Err("price must not be negative".to_string());
    }

    let cents = (major * 100.0).round();
    if cents >= i64::MAX as f64 {
        return Err("price is too large".to_string());
    }

    Ok(Money::from_cents(cents as i64))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new(2), "iPhone 17", Money::from_major(999)).unwrap();
        cart.add_item(ProductId::new(2), "iPhone 17", Money::from_major(999)).unwrap();
        cart.add_item(ProductId::new(9), "Case", Money::from_cents(1999)).unwrap();
        cart
    }

    #[test]
    fn test_encode_wire_format() {
        let json = encode(&sample_cart()).unwrap();
        assert_eq!(
            json,
            r#"[{"id":2,"name":"iPhone 17","price":999,"qty":2},{"id":9,"name":"Case","price":19.99,"qty":1}]"#
        );
    }

    #[test]
    fn test_encode_empty_cart() {
        assert_eq!(encode(&Cart::new()).unwrap(), "[]");
    }

    #[test]
    fn test_decode_restores_order_and_quantities() {
        let cart = sample_cart();
        let decoded = decode(&encode(&cart).unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_decode_accepts_float_whole_prices() {
        let cart = decode(r#"[{"id":1,"name":"iPhone 17 Pro Max","price":1199.0,"qty":1}]"#).unwrap();
        assert_eq!(cart.items()[0].price, Money::from_major(1199));
    }

    #[test]
    fn test_decode_rounds_to_cents() {
        let cart = decode(r#"[{"id":1,"name":"Cable","price":19.994,"qty":1}]"#).unwrap();
        assert_eq!(cart.items()[0].price, Money::from_cents(1999));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let cart = decode(
            r#"[{"id":4,"name":"Samsung Galaxy S26","price":999,"qty":1,"image":"s26.jpg"}]"#,
        )
        .unwrap();
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        let bad = [
            "",
            "not json",
            "{}",
            r#"{"id":1}"#,
            r#"[{"id":1,"name":"A","price":1}]"#,
            r#"[{"id":"1","name":"A","price":1,"qty":1}]"#,
            r#"[{"id":-1,"name":"A","price":1,"qty":1}]"#,
            r#"[{"id":1,"name":"A","price":"999","qty":1}]"#,
            r#"[{"id":1,"name":"A","price":1,"qty":0}]"#,
            r#"[{"id":1,"name":"A","price":1,"qty":1.5}]"#,
            r#"[{"id":1,"name":"A","price":-1,"qty":1}]"#,
            r#"[{"id":1,"name":"  ","price":1,"qty":1}]"#,
            r#"[{"id":1,"name":"A","price":1,"qty":1},{"id":1,"name":"A","price":1,"qty":1}]"#,
            r#"[null]"#,
            r#"[{"id":1,"name":"A","price":100000000000,"qty":4000000000}]"#,
            r#"[{"id":1,"name":"A","price":90000000000000000,"qty":1},{"id":2,"name":"B","price":90000000000000000,"qty":1}]"#,
        ];

        for raw in bad {
            assert!(
                matches!(decode(raw), Err(PersistenceError::Malformed(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_one_bad_item_rejects_whole_payload() {
        let raw = r#"[{"id":1,"name":"A","price":1,"qty":1},{"id":2,"name":"B","price":1,"qty":0}]"#;
        let err = decode(raw).unwrap_err();
        assert!(err.to_string().contains("item 1"));
    }
}
