//! Storefront domain types and logic.
//!
//! - **Catalog**: products, categories, client-side listing filters
//! - **Cart**: cart reducer, persisted cart store, order summary pricing
//! - **Checkout**: billing/payment flow, payment instruments, orders, and
//!   the two-call order submission pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_core::prelude::*;
//!
//! let mut cart = CartStore::open(Cache::open(data_dir)?);
//! cart.add_item(product.to_cart_item(2));
//!
//! let mut flow = CheckoutFlow::new();
//! flow.set_billing_address(address);
//! flow.advance()?;
//! flow.capture_instrument(DemoCollector.collect_card(&card)?);
//!
//! let confirmation = OrderSubmitter::new(&api).submit(&mut flow, &mut cart).await?;
//! println!("Order placed: {}", confirmation.redirect_path);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Money, CURRENCY_SYMBOL};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        CatalogFilter, Category, ListingSource, PriceBucket, PriceRange, Product, PRICE_BUCKETS,
    };

    // Cart
    pub use crate::cart::{
        validate_quantity, CachedCartPersistence, Cart, CartItem, CartPersistence, CartStore,
        NewCartItem, OrderSummary, PricingPolicy,
    };

    // Checkout
    pub use crate::checkout::{
        Address, AddressField, CardDetails, CheckoutFlow, CheckoutStep, CreateOrderRequest,
        DemoCollector, GatewayError, Order, OrderConfirmation, OrderGateway, OrderItem,
        OrderStatus, OrderSubmitter, PaymentCapture, PaymentCollector, PaymentInstrumentToken,
        PaymentMethod, PaymentRequest, PaymentStatus, SubmitError,
    };

    pub use storefront_cache::Cache;
}
