//! # Cart Store
//!
//! Owns the shopper's cart, keeps it in a key-value slot and tells the
//! presentation layer when it changes.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Mutation                                   │
//! │                                                                         │
//! │  add(id, name, price) / remove(index) / clear()                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌────────────────────────────┐   rejected input                        │
//! │  │  forphone_core::Cart        │ ──────────────────► Err(CoreError)     │
//! │  │  (merge, bounds, validate)  │   nothing saved, nothing emitted       │
//! │  └─────────────┬──────────────┘                                         │
//! │                │ applied                                                │
//! │                ▼                                                        │
//! │  save() ── encode ── storage.set(key, json)                             │
//! │                │                                                        │
//! │                ├── Ok  ──► last_persistence_error = None                │
//! │                └── Err ──► warn!, last_persistence_error = Some(..)     │
//! │                            (the in-memory change stands)                │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  emit CartChanged, then ItemAdded { name } for add()                    │
//! │  (subscribers called in subscription order, before the call returns)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail Open
//! Nothing in here stops the shopper. An unreadable or corrupted slot loads
//! as an empty cart; a slot that cannot be written leaves the cart working
//! in memory for the rest of the session.

use std::fmt;

use forphone_core::{Cart, CartLineItem, CartTotals, CartView, CoreError, Money, ProductId};
use forphone_storage::{KeyValueStore, StorageError};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::codec;

/// Slot the cart is kept under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "forphoneCart";

/// Result of a cart mutation.
pub type CartResult<T> = Result<T, CoreError>;

// =============================================================================
// Events
// =============================================================================

/// Notification sent to subscribers after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// The cart contents may have changed; redraw it.
    CartChanged,

    /// A unit of `name` was added.
    ItemAdded { name: String },
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent)>;

// =============================================================================
// Errors
// =============================================================================

/// Why the cart could not be loaded or saved.
///
/// Recorded and logged, never returned from `load` or `save`.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The slot could not be read.
    #[error("Failed to read saved cart: {0}")]
    Read(#[source] StorageError),

    /// The slot could not be written (quota, disabled storage, I/O).
    #[error("Failed to save cart: {0}")]
    Write(#[source] StorageError),

    /// The slot holds something that is not a valid cart.
    #[error("Saved cart is malformed: {0}")]
    Malformed(String),

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(String),
}

/// What [`CartStore::load`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing saved yet.
    Empty,

    /// A saved cart was restored.
    Restored { lines: usize },

    /// The saved cart was unreadable or malformed and was ignored.
    Discarded,
}

// =============================================================================
// Cart Store
// =============================================================================

/// The persisted, observable cart.
///
/// ## Usage
/// ```rust
/// use forphone_core::{Money, ProductId};
/// use forphone_storage::MemoryStore;
/// use forphone_storefront_lib::state::CartStore;
///
/// let mut store = CartStore::new(MemoryStore::new());
/// store.load();
/// store.add(ProductId::new(2), "iPhone 17", Money::from_major(999)).unwrap();
/// assert_eq!(store.totals().item_count, 1);
/// ```
pub struct CartStore<S: KeyValueStore> {
    storage: S,
    key: String,
    cart: Cart,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persistence_error: Option<PersistenceError>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Creates a store over `storage` using the default slot key.
    ///
    /// The cart starts empty; call [`load`](Self::load) to restore it.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Creates a store over `storage` using `key` as the slot.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        CartStore {
            storage,
            key: key.into(),
            cart: Cart::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            last_persistence_error: None,
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replaces the in-memory cart with the saved one.
    ///
    /// Absent, unreadable or malformed data all leave an empty cart. Always
    /// emits `CartChanged` so the first render happens.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.storage.get(&self.key) {
            Ok(None) => {
                self.cart = Cart::new();
                self.last_persistence_error = None;
                LoadOutcome::Empty
            }
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(cart) => {
                    let lines = cart.len();
                    self.cart = cart;
                    self.last_persistence_error = None;
                    LoadOutcome::Restored { lines }
                }
                Err(e) => self.discard(e),
            },
            Err(e) => self.discard(PersistenceError::Read(e)),
        };

        info!(key = %self.key, ?outcome, "Cart loaded");
        self.emit(CartEvent::CartChanged);
        outcome
    }

    fn discard(&mut self, error: PersistenceError) -> LoadOutcome {
        warn!(key = %self.key, error = %error, "Ignoring saved cart, starting empty");
        self.cart = Cart::new();
        self.last_persistence_error = Some(error);
        LoadOutcome::Discarded
    }

    /// Writes the full cart to the slot.
    ///
    /// Best effort: a failure is logged and kept in
    /// [`last_persistence_error`](Self::last_persistence_error).
    pub fn save(&mut self) {
        let result = codec::encode(&self.cart).and_then(|json| {
            self.storage
                .set(&self.key, &json)
                .map_err(PersistenceError::Write)
        });

        match result {
            Ok(()) => {
                debug!(key = %self.key, lines = self.cart.len(), "Cart saved");
                self.last_persistence_error = None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart not saved, keeping it in memory");
                self.last_persistence_error = Some(e);
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product, merging with an existing line.
    ///
    /// ## Events
    /// `CartChanged`, then `ItemAdded { name }`.
    ///
    /// ## Errors
    /// Invalid name or price, or quantity overflow. Nothing changes.
    pub fn add(&mut self, id: ProductId, name: &str, price: Money) -> CartResult<()> {
        self.cart.add_item(id, name, price)?;
        self.save();

        self.emit(CartEvent::CartChanged);
        self.emit(CartEvent::ItemAdded {
            name: name.trim().to_string(),
        });
        Ok(())
    }

    /// Removes the line at `index`.
    ///
    /// ## Errors
    /// `OutOfRange` if `index` is past the end. Nothing is saved or emitted.
    pub fn remove(&mut self, index: usize) -> CartResult<CartLineItem> {
        let removed = self.cart.remove_at(index)?;
        self.save();
        self.emit(CartEvent::CartChanged);
        Ok(removed)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.save();
        self.emit(CartEvent::CartChanged);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn view(&self) -> CartView {
        self.cart.view()
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// The slot key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The failure from the most recent load or save, if it failed.
    pub fn last_persistence_error(&self) -> Option<&PersistenceError> {
        self.last_persistence_error.as_ref()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a callback for every future event.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: CartEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl<S: KeyValueStore> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .field("last_persistence_error", &self.last_persistence_error)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
