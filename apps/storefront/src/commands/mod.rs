//! # Storefront Commands
//!
//! One function per shopper action. The shell parses a line, calls the
//! matching command with the state it needs, and renders the result.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product listing and brand filter
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Checkout form and order confirmation
//! └── listing.rs   ◄─── "Sell your phone" form
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! pub fn add_to_cart<S: KeyValueStore>(
//!     catalog: &Catalog,          // ◄── read-only reference data
//!     cart: &mut CartStore<S>,    // ◄── mutated, persisted, notifies
//!     product_id: u32,            // ◄── from the shell line
//! ) -> Result<CartResponse, ApiError>
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod listing;
