//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A candidate line item, as submitted from a product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    /// Product being added.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at the time of adding.
    pub price: Money,
    /// Quantity to add.
    pub quantity: u32,
    /// Image URL.
    pub image_url: String,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Synthetic line item identifier, generated when the line is created.
    pub id: LineItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Quantity (at least 1 when set through the store's guarded paths).
    pub quantity: u32,
    /// Image URL.
    #[serde(default)]
    pub image_url: String,
}

impl CartItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

/// A shopping cart.
///
/// `total_amount` and `total_items` are derived: every mutation recomputes
/// them from `items`, and [`Cart::recalculate`] must be called after
/// deserializing a cart from untrusted storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in insertion order.
    pub items: Vec<CartItem>,
    /// Sum of price times quantity.
    #[serde(default)]
    pub total_amount: Money,
    /// Sum of quantities.
    #[serde(default)]
    pub total_items: u64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the cart.
    ///
    /// If a line for the same product exists its quantity grows by the
    /// candidate's quantity; otherwise a new line is appended. Returns the id
    /// of the affected line. A candidate quantity of 0 is treated as 1.
    pub fn add_item(&mut self, candidate: NewCartItem) -> LineItemId {
        let quantity = if candidate.quantity == 0 {
            tracing::warn!(
                product_id = %candidate.product_id,
                "cart candidate with zero quantity, clamping to 1"
            );
            1
        } else {
            candidate.quantity
        };

        let id = if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == candidate.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            existing.id
        } else {
            let item = CartItem {
                id: LineItemId::generate(),
                product_id: candidate.product_id,
                name: candidate.name,
                price: candidate.price,
                quantity,
                image_url: candidate.image_url,
            };
            let id = item.id;
            self.items.push(item);
            id
        };

        self.recalculate();
        id
    }

    /// Remove an item from the cart. Returns whether anything was removed.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.recalculate();
        self.items.len() < len_before
    }

    /// Set an item's quantity. Returns whether the item was found.
    ///
    /// No clamping happens here; callers validate with
    /// [`validate_quantity`] first.
    pub fn update_quantity(&mut self, line_item_id: &LineItemId, quantity: u32) -> bool {
        let found = match self.items.iter_mut().find(|i| &i.id == line_item_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        };
        self.recalculate();
        found
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Recompute the derived totals from the items.
    pub fn recalculate(&mut self) {
        self.total_items = self.items.iter().map(|i| u64::from(i.quantity)).sum();
        self.total_amount = self.items.iter().map(CartItem::line_total).sum();
    }

    /// Repair lines loaded from storage.
    ///
    /// Lines with a zero quantity or a negative price are dropped and repeat
    /// lines for one product fold into the first, so the cart again holds at
    /// most one line per product. Totals are recomputed. Returns how many
    /// lines were dropped or folded.
    pub fn normalize(&mut self) -> usize {
        let before = self.items.len();
        let mut kept: Vec<CartItem> = Vec::with_capacity(before);
        for item in self.items.drain(..) {
            if item.quantity == 0 || item.price.is_negative() {
                continue;
            }
            match kept.iter_mut().find(|k| k.product_id == item.product_id) {
                Some(first) => first.quantity = first.quantity.saturating_add(item.quantity),
                None => kept.push(item),
            }
        }
        self.items = kept;
        self.recalculate();
        before - self.items.len()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.total_items
    }

    /// Get number of lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Get an item by product ID.
    pub fn get_item_by_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }
}

/// Validate a shopper-entered quantity before it reaches the cart.
///
/// The cart itself never rejects a quantity; this guard is what keeps
/// lines at 1 or more.
pub fn validate_quantity(quantity: i64) -> Result<u32, CommerceError> {
    if quantity < 1 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| CommerceError::InvalidQuantity(quantity))
}
