//! Product types.

use crate::cart::NewCartItem;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};

/// A product in the catalog, as served by `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    /// Category slug (e.g., "men", "accessories").
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Whether the product can currently be purchased.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

// Nullable text columns come back as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Create a new in-stock product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            image_url: String::new(),
            category: category.into(),
            in_stock: true,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.in_stock
    }

    /// Build a cart candidate for this product at its current price.
    pub fn to_cart_item(&self, quantity: u32) -> NewCartItem {
        NewCartItem {
            product_id: self.id,
            name: self.name.clone(),
            price: self.price,
            quantity,
            image_url: self.image_url.clone(),
        }
    }
}
