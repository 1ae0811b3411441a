//! # ForPhone Storefront Library
//!
//! The storefront application: configuration, the persisted cart, shopper
//! commands and the line shell that drives them.
//!
//! ## Module Organization
//! ```text
//! forphone_storefront_lib/
//! ├── lib.rs          ◄─── You are here (Storefront wiring & run)
//! ├── state/
//! │   ├── mod.rs         ◄─── State type exports
//! │   ├── cart_store.rs  ◄─── Persisted, observable cart
//! │   ├── codec.rs       ◄─── Cart slot JSON format
//! │   ├── toast.rs       ◄─── Auto-dismissed notifications
//! │   └── config.rs      ◄─── StorefrontConfig
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Product listing
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── checkout.rs ◄─── Order placement
//! │   └── listing.rs  ◄─── Sell form
//! ├── render.rs       ◄─── Plain-text views
//! ├── shell.rs        ◄─── Line parser and loop
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Event Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore ── CartChanged ──────────► cart_dirty = true                 │
//! │      │                                 (badge "Cart (n)" redrawn)       │
//! │      │                                                                  │
//! │      └─────── ItemAdded { name } ────► ToastQueue.push(                 │
//! │                                          "<name> added to cart!", now)  │
//! │                                                                         │
//! │  Both subscriptions are closures bound once in Storefront::new.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::cell::{Cell, Ref, RefCell};
use std::io;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use forphone_core::Catalog;
use forphone_storage::{KeyValueStore, MemoryStore, StorageConfig, StorageError};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{cart, catalog, checkout, listing};
use error::ApiError;
use shell::ShellCommand;
use state::{CartEvent, CartStore, LoadOutcome, StorefrontConfig, ToastQueue};

// =============================================================================
// Storefront
// =============================================================================

/// Output of one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The shopper asked to leave.
    pub quit: bool,
}

/// Everything one shopping session needs, owned in one place.
pub struct Storefront<S: KeyValueStore> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore<S>,
    toasts: Rc<RefCell<ToastQueue>>,
    clock: Rc<Cell<DateTime<Utc>>>,
    cart_dirty: Rc<Cell<bool>>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Wires the cart store to the toast queue and the badge.
    ///
    /// The cart is not loaded until [`start`](Self::start).
    pub fn new(config: StorefrontConfig, storage: S) -> Self {
        let mut cart = CartStore::with_key(storage, config.storage_key.clone());
        let toasts = Rc::new(RefCell::new(ToastQueue::new(config.toast_duration_ms)));
        let clock = Rc::new(Cell::new(Utc::now()));
        let cart_dirty = Rc::new(Cell::new(false));

        let dirty = Rc::clone(&cart_dirty);
        let toast_sink = Rc::clone(&toasts);
        let toast_clock = Rc::clone(&clock);
        cart.subscribe(move |event| match event {
            CartEvent::CartChanged => dirty.set(true),
            CartEvent::ItemAdded { name } => toast_sink
                .borrow_mut()
                .push(ToastQueue::added_to_cart_message(name), toast_clock.get()),
        });

        Storefront {
            config,
            catalog: Catalog::default_phones(),
            cart,
            toasts,
            clock,
            cart_dirty,
        }
    }

    /// Restores the saved cart.
    pub fn start(&mut self) -> LoadOutcome {
        self.cart.load()
    }

    /// Greeting shown when the shell opens.
    pub fn banner(&self) -> String {
        format!(
            "Welcome to {}! Type 'help' for commands.\n{}",
            self.config.store_name,
            render::render_badge(&self.cart.totals())
        )
    }

    /// Runs one command at time `now`.
    pub fn dispatch(&mut self, command: ShellCommand, now: DateTime<Utc>) -> Reply {
        self.clock.set(now);
        self.cart_dirty.set(false);
        self.toasts.borrow_mut().prune(now);

        let quit = command == ShellCommand::Quit;
        let mut parts = Vec::new();

        match self.execute(command, now) {
            Ok(Some(text)) => parts.push(text),
            Ok(None) => {}
            Err(e) => parts.push(render::render_error(&e)),
        }

        if self.cart_dirty.get() {
            parts.push(render::render_badge(&self.cart.totals()));
        }
        if let Some(toasts) = render::render_toasts(&self.toasts.borrow(), now) {
            parts.push(toasts);
        }

        Reply {
            text: parts.join("\n"),
            quit,
        }
    }

    fn execute(&mut self, command: ShellCommand, now: DateTime<Utc>) -> Result<Option<String>, ApiError> {
        let config = &self.config;

        let text = match command {
            ShellCommand::Products { filter } => {
                let response = catalog::list_products(&self.catalog, &filter)?;
                Some(render::render_products(config, &response))
            }
            ShellCommand::Add { product_id } => {
                cart::add_to_cart(&self.catalog, &mut self.cart, product_id)?;
                None
            }
            ShellCommand::Remove { index } => {
                let response = cart::remove_from_cart(&mut self.cart, index)?;
                Some(render::render_cart(config, &response))
            }
            ShellCommand::Cart => Some(render::render_cart(config, &cart::get_cart(&self.cart))),
            ShellCommand::Clear => {
                cart::clear_cart(&mut self.cart);
                Some("Cart cleared.".to_string())
            }
            ShellCommand::Checkout(form) => {
                let order = checkout::place_order(&mut self.cart, &form, now)?;
                Some(render::render_order(config, &order))
            }
            ShellCommand::Sell(form) => {
                let receipt = listing::submit_listing(&form, now)?;
                Some(render::render_listing(config, &receipt))
            }
            ShellCommand::Help => Some(render::HELP.to_string()),
            ShellCommand::Quit => Some("Goodbye!".to_string()),
        };

        Ok(text)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn toasts(&self) -> Ref<'_, ToastQueue> {
        self.toasts.borrow()
    }
}

// =============================================================================
// Application Entry
// =============================================================================

/// Runs the storefront shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (stderr, RUST_LOG override)                      │
/// │  2. Load StorefrontConfig (defaults → forphone.toml → FORPHONE_*)       │
/// │  3. Open storage                                                        │
/// │     • --ephemeral / FORPHONE_EPHEMERAL: in-memory, nothing written      │
/// │     • otherwise: file store in data_dir or the platform data dir        │
/// │  4. Build Storefront, load the saved cart                               │
/// │  5. Read commands until `quit` or end of input                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting ForPhone storefront");

    let mut config = StorefrontConfig::load()?;
    if std::env::args().skip(1).any(|arg| arg == "--ephemeral") {
        config.ephemeral = true;
    }

    let storage = open_storage(&config)?;
    let mut storefront = Storefront::new(config, storage);
    let outcome = storefront.start();
    info!(?outcome, "Storefront ready");

    let stdin = io::stdin();
    shell::run_shell(&mut storefront, stdin.lock(), io::stdout())?;

    info!("Storefront closed");
    Ok(())
}

/// Picks the key-value store for this session.
fn open_storage(config: &StorefrontConfig) -> Result<Box<dyn KeyValueStore>, StorageError> {
    if config.ephemeral {
        info!("Ephemeral mode: the cart will not be saved");
        return Ok(Box::new(MemoryStore::new()));
    }

    let storage_config = match &config.data_dir {
        Some(dir) => StorageConfig::new(dir),
        None => StorageConfig::default_location()?,
    };
    Ok(Box::new(storage_config.open_file_store()))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=forphone_storage=trace` - Trace the storage crate only
/// - Default: INFO, DEBUG for the storefront and storage crates
///
/// Logs go to stderr so they never mix with shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,forphone_storefront_lib=debug,forphone_storage=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use commands::checkout::CheckoutForm;

    fn storefront() -> Storefront<MemoryStore> {
        let mut storefront = Storefront::new(StorefrontConfig::default(), MemoryStore::new());
        storefront.start();
        storefront
    }

    #[test]
    fn test_add_shows_badge_and_toast() {
        let mut storefront = storefront();
        let now = Utc::now();

        let reply = storefront.dispatch(ShellCommand::Add { product_id: 3 }, now);
        assert_eq!(
            reply.text,
            "Cart (1)\n* Samsung Galaxy S26 Ultra added to cart!"
        );
        assert!(!reply.quit);
    }

    #[test]
    fn test_toast_gone_after_duration() {
        let mut storefront = storefront();
        let now = Utc::now();

        storefront.dispatch(ShellCommand::Add { product_id: 1 }, now);
        let reply = storefront.dispatch(ShellCommand::Help, now + Duration::milliseconds(3000));

        assert!(!reply.text.contains("added to cart!"));
        assert!(storefront.toasts().is_empty());
    }

    #[test]
    fn test_read_only_commands_skip_badge() {
        let mut storefront = storefront();
        let reply = storefront.dispatch(ShellCommand::Cart, Utc::now());
        assert_eq!(reply.text, "Your cart is empty.");
    }

    #[test]
    fn test_errors_are_rendered() {
        let mut storefront = storefront();

        let reply = storefront.dispatch(ShellCommand::Add { product_id: 99 }, Utc::now());
        assert_eq!(reply.text, "Error: Product not found: 99");

        let reply = storefront.dispatch(ShellCommand::Remove { index: 0 }, Utc::now());
        assert!(reply.text.starts_with("Error: "));

        let form = CheckoutForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Main St".to_string(),
            card_number: "4242424242424242".to_string(),
        };
        let reply = storefront.dispatch(ShellCommand::Checkout(form), Utc::now());
        assert_eq!(reply.text, "Error: Cart is empty!");
    }

    #[test]
    fn test_checkout_through_dispatch() {
        let mut storefront = storefront();
        let now = Utc::now();
        storefront.dispatch(ShellCommand::Add { product_id: 5 }, now);

        let form = CheckoutForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Main St".to_string(),
            card_number: "4242-4242-4242-4242".to_string(),
        };
        let reply = storefront.dispatch(ShellCommand::Checkout(form), now);

        assert!(reply.text.starts_with("Order placed successfully!"));
        assert!(reply.text.contains("$1099.00"));
        assert!(reply.text.contains("Cart (0)"));
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn test_cart_survives_restart() {
        let mut storage = MemoryStore::new();
        {
            let mut first = Storefront::new(StorefrontConfig::default(), &mut storage);
            first.start();
            first.dispatch(ShellCommand::Add { product_id: 2 }, Utc::now());
            first.dispatch(ShellCommand::Add { product_id: 2 }, Utc::now());
        }

        let mut second = Storefront::new(StorefrontConfig::default(), storage);
        assert_eq!(second.start(), LoadOutcome::Restored { lines: 1 });
        assert_eq!(second.cart().totals().item_count, 2);
        assert!(second.banner().ends_with("Cart (2)"));
    }

    #[test]
    fn test_quit() {
        let mut storefront = storefront();
        let reply = storefront.dispatch(ShellCommand::Quit, Utc::now());
        assert!(reply.quit);
        assert_eq!(reply.text, "Goodbye!");
    }
}
