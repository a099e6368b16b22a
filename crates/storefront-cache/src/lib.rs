//! Type-safe key-value persistence for the storefront client.
//!
//! Provides a small, ergonomic API for keeping client state (the cart blob,
//! the bearer token) in a durable key-value store with automatic JSON
//! serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::Cache;
//!
//! let cache = Cache::open(data_dir)?;
//!
//! // Store a value
//! cache.set("cart-storage", &persisted)?;
//!
//! // Retrieve a value
//! let restored: Option<PersistedCart> = cache.get("cart-storage")?;
//!
//! // Delete a value
//! cache.delete("token")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
