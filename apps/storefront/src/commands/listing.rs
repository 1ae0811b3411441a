//! # Sell Listing Commands
//!
//! The "sell your phone" form. A listing is validated and acknowledged;
//! nothing is stored and nobody is contacted.

use chrono::{DateTime, Utc};
use forphone_core::validation::{
    validate_asking_price, validate_email, validate_listing_condition, validate_required,
};
use forphone_core::{Brand, Money, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;

/// Message shown after a listing is submitted.
pub const LISTING_SUBMITTED_MESSAGE: &str = "Listing submitted! We'll review it.";

/// The sell form as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellListingForm {
    pub model: String,
    pub brand: String,
    pub condition: String,
    pub asking_price: String,
    pub contact_email: String,
}

/// A validated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellListing {
    pub model: String,
    pub brand: Brand,
    /// One of `new`, `like-new`, `good`, `fair`.
    pub condition: String,
    pub asking_price: Money,
    pub contact_email: String,
}

impl TryFrom<&SellListingForm> for SellListing {
    type Error = ValidationError;

    fn try_from(form: &SellListingForm) -> Result<Self, Self::Error> {
        let model = validate_required("model", &form.model)?.to_string();
        let brand: Brand = form.brand.parse()?;
        let condition = validate_listing_condition(&form.condition)?;

        let asking_price: Money = validate_required("asking price", &form.asking_price)?
            .parse()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "asking price".to_string(),
                reason: "expected an amount like 450 or 450.50".to_string(),
            })?;
        validate_asking_price(asking_price)?;

        validate_email(&form.contact_email)?;

        Ok(SellListing {
            model,
            brand,
            condition,
            asking_price,
            contact_email: form.contact_email.trim().to_string(),
        })
    }
}

/// Acknowledgement for a submitted listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingReceipt {
    pub listing_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub listing: SellListing,
    pub message: String,
}

/// Validates and acknowledges a listing.
///
/// ## Errors
/// `ValidationError` naming the first bad field.
pub fn submit_listing(form: &SellListingForm, now: DateTime<Utc>) -> Result<ListingReceipt, ApiError> {
    debug!(model = %form.model, "submit_listing command");

    let listing = SellListing::try_from(form)?;
    let receipt = ListingReceipt {
        listing_id: Uuid::new_v4(),
        submitted_at: now,
        listing,
        message: LISTING_SUBMITTED_MESSAGE.to_string(),
    };

    info!(
        listing_id = %receipt.listing_id,
        brand = %receipt.listing.brand,
        price = %receipt.listing.asking_price,
        "Sell listing submitted"
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn valid_form() -> SellListingForm {
        SellListingForm {
            model: "iPhone 15".to_string(),
            brand: "Apple".to_string(),
            condition: "Like-New".to_string(),
            asking_price: "450.50".to_string(),
            contact_email: " seller@example.com ".to_string(),
        }
    }

    #[test]
    fn test_submit_listing() {
        let now = Utc::now();
        let receipt = submit_listing(&valid_form(), now).unwrap();

        assert_eq!(receipt.submitted_at, now);
        assert_eq!(receipt.message, "Listing submitted! We'll review it.");
        assert_eq!(receipt.listing.brand, Brand::Apple);
        assert_eq!(receipt.listing.condition, "like-new");
        assert_eq!(receipt.listing.asking_price, Money::from_cents(45_050));
        assert_eq!(receipt.listing.contact_email, "seller@example.com");
    }

    #[test]
    fn test_listing_field_errors() {
        let cases = [
            SellListingForm { model: " ".to_string(), ..valid_form() },
            SellListingForm { brand: "nokia".to_string(), ..valid_form() },
            SellListingForm { condition: "broken".to_string(), ..valid_form() },
            SellListingForm { asking_price: "0".to_string(), ..valid_form() },
            SellListingForm { asking_price: "cheap".to_string(), ..valid_form() },
            SellListingForm { contact_email: "nobody".to_string(), ..valid_form() },
        ];

        for form in cases {
            let err = submit_listing(&form, Utc::now()).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{form:?}");
        }
    }
}
