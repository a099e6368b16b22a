//! Shopping cart module.
//!
//! Contains the cart reducer, the persisted cart store, and order summary
//! pricing.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;
mod store;

pub use cart::{validate_quantity, Cart, CartItem, NewCartItem};
pub use pricing::{OrderSummary, PricingPolicy};
pub use store::{
    CachedCartPersistence, CartPersistence, CartStore, PersistedCart, CART_STORAGE_KEY,
    CART_STORAGE_VERSION,
};
