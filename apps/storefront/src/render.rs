//! # Text Rendering
//!
//! Plain-text views of command results for the line shell.
//!
//! ```text
//! ForPhone · Cart (3)
//!   [0] iPhone 17                   x2   $999.00   $1998.00
//!   [1] Samsung Galaxy S26 Ultra    x1  $1299.00   $1299.00
//!   Items: 3   Total: $3297.00
//!   * Samsung Galaxy S26 Ultra added to cart!
//! ```

use chrono::{DateTime, Utc};
use forphone_core::CartTotals;

use crate::commands::cart::CartResponse;
use crate::commands::catalog::ProductListResponse;
use crate::commands::checkout::OrderConfirmation;
use crate::commands::listing::ListingReceipt;
use crate::error::ApiError;
use crate::state::{StorefrontConfig, ToastQueue};

/// Shown by `help`.
pub const HELP: &str = "\
Commands:
  products [all|apple|samsung|google|oneplus]   list phones
  add <product-id>                              add one unit to the cart
  remove <line>                                 remove a cart line
  cart                                          show the cart
  clear                                         empty the cart
  checkout <name> | <email> | <address> | <card>
  sell <model> | <brand> | <condition> | <price> | <email>
  help                                          show this list
  quit                                          leave the store";

pub fn render_products(config: &StorefrontConfig, response: &ProductListResponse) -> String {
    if response.products.is_empty() {
        return format!("No phones for filter '{}'.", response.filter);
    }

    let mut out = format!("Phones ({}):", response.filter);
    for product in &response.products {
        out.push_str(&format!(
            "\n  {:>2}  {:<28} {:>10}  {}",
            product.id.get(),
            product.name,
            config.format_currency(product.price),
            product.brand
        ));
    }
    out
}

pub fn render_cart(config: &StorefrontConfig, cart: &CartResponse) -> String {
    if cart.lines.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::from("Cart:");
    for line in &cart.lines {
        out.push_str(&format!(
            "\n  [{}] {:<28} x{:<3} {:>10} {:>10}",
            line.index,
            line.name,
            line.quantity,
            config.format_currency(line.price),
            config.format_currency(line.subtotal)
        ));
    }
    out.push_str(&format!(
        "\n  Items: {}   Total: {}",
        cart.totals.item_count,
        config.format_currency(cart.totals.grand_total)
    ));
    out
}

/// The header cart link: `Cart (3)`.
pub fn render_badge(totals: &CartTotals) -> String {
    format!("Cart ({})", totals.item_count)
}

/// Visible toasts, one per line, oldest first.
pub fn render_toasts(toasts: &ToastQueue, now: DateTime<Utc>) -> Option<String> {
    let lines: Vec<String> = toasts.visible(now).map(|t| format!("* {}", t.message)).collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

pub fn render_order(config: &StorefrontConfig, order: &OrderConfirmation) -> String {
    format!(
        "{}\n  Order {}\n  {} item(s), {} total, card ending {} (not charged)\n  Thank you, {}!",
        order.message,
        order.order_id,
        order.totals.item_count,
        config.format_currency(order.totals.grand_total),
        order.card_last4,
        order.customer_name
    )
}

pub fn render_listing(config: &StorefrontConfig, receipt: &ListingReceipt) -> String {
    format!(
        "{}\n  Listing {}: {} {} ({}) asking {}",
        receipt.message,
        receipt.listing_id,
        receipt.listing.brand,
        receipt.listing.model,
        receipt.listing.condition,
        config.format_currency(receipt.listing.asking_price)
    )
}

pub fn render_error(err: &ApiError) -> String {
    format!("Error: {}", err.message)
}
