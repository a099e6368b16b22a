//! Product catalog module.
//!
//! Contains product and category types and the in-memory listing filter.

mod category;
mod filter;
mod product;

pub use category::Category;
pub use filter::{CatalogFilter, ListingSource, PriceBucket, PriceRange, PRICE_BUCKETS};
pub use product::Product;
