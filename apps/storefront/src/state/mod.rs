//! # State Module
//!
//! Everything the storefront keeps between commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  CartStore<S>    │  │   ToastQueue     │  │  StorefrontConfig    │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Cart            │  │  auto-dismissed  │  │  store name          │  │
//! │  │  + slot in S     │  │  messages        │  │  storage key         │  │
//! │  │  + subscribers ──┼─►│                  │  │  toast duration      │  │
//! │  └────────┬─────────┘  └──────────────────┘  └──────────────────────┘  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  codec: Cart <──► JSON slot text                                        │
//! │                                                                         │
//! │  Single-threaded: shared pieces use Rc<RefCell<_>>, no locks.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart_store;
pub mod codec;
mod config;
mod toast;

pub use cart_store::{
    CartEvent, CartResult, CartStore, LoadOutcome, PersistenceError, SubscriptionId,
    DEFAULT_CART_KEY,
};
pub use config::{ConfigError, StorefrontConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
pub use toast::{Toast, ToastQueue, DEFAULT_TOAST_MS};
