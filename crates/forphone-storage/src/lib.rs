//! # forphone-storage: Key-Value Storage for the ForPhone Storefront
//!
//! This crate provides the string-keyed slot storage the cart persists into.
//! It knows nothing about carts: callers hand it strings.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CartStore::save()  (encodes cart to JSON)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  forphone-storage (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │  MemoryStore  │    │  FileStore   │  │   │
//! │  │   │   (trait)     │◄───│  HashMap +    │    │  one file    │  │   │
//! │  │   │ get/set/remove│    │  byte quota   │    │  per key     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/forphone-store/forphoneCart.json (FileStore)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `KeyValueStore` trait and key rules
//! - [`memory`] - In-memory store with optional quota
//! - [`file`] - File-backed store with atomic writes
//! - [`config`] - Storage location configuration
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use forphone_storage::{KeyValueStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.set("forphoneCart", "[]").unwrap();
//! assert_eq!(store.get("forphoneCart").unwrap().as_deref(), Some("[]"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{validate_key, KeyValueStore};
