//! The persisted cart store.
//!
//! [`CartStore`] owns the single cart of a storefront session. Every mutation
//! updates the in-memory cart first and then writes the whole cart through a
//! [`CartPersistence`] backend. A failed write is logged and never rolls the
//! mutation back.

use crate::cart::{Cart, CartItem, NewCartItem, OrderSummary, PricingPolicy};
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use serde::{Deserialize, Serialize};
use storefront_cache::Cache;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Schema version written alongside the persisted cart.
pub const CART_STORAGE_VERSION: u32 = 0;

/// Durable storage for the cart.
pub trait CartPersistence: Send + Sync {
    /// Load the last saved cart, if any.
    fn load(&self) -> Result<Option<Cart>, CommerceError>;

    /// Save the whole cart.
    fn save(&self, cart: &Cart) -> Result<(), CommerceError>;
}

/// On-disk envelope: `{"state": {...cart}, "version": 0}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedCart {
    /// The cart itself.
    pub state: Cart,
    /// Schema version.
    #[serde(default)]
    pub version: u32,
}

/// [`CartPersistence`] over a [`Cache`].
#[derive(Debug, Clone)]
pub struct CachedCartPersistence {
    cache: Cache,
    key: String,
}

impl CachedCartPersistence {
    /// Persist under [`CART_STORAGE_KEY`].
    pub fn new(cache: Cache) -> Self {
        Self::with_key(cache, CART_STORAGE_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }
}

impl CartPersistence for CachedCartPersistence {
    fn load(&self) -> Result<Option<Cart>, CommerceError> {
        let persisted: Option<PersistedCart> = self.cache.get(&self.key)?;
        Ok(persisted.map(|p| p.state))
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        let envelope = PersistedCart {
            state: cart.clone(),
            version: CART_STORAGE_VERSION,
        };
        self.cache.set(&self.key, &envelope)?;
        Ok(())
    }
}

/// The session's cart plus its persistence.
pub struct CartStore {
    cart: Cart,
    persistence: Option<Box<dyn CartPersistence>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("persistent", &self.persistence.is_some())
            .finish()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// An empty, non-persistent store.
    pub fn new() -> Self {
        Self {
            cart: Cart::new(),
            persistence: None,
        }
    }

    /// An empty store that writes through `persistence`.
    ///
    /// Call [`CartStore::restore`] to pick up a previously saved cart.
    pub fn with_persistence(persistence: impl CartPersistence + 'static) -> Self {
        Self {
            cart: Cart::new(),
            persistence: Some(Box::new(persistence)),
        }
    }

    /// Open a store over `cache` and restore whatever cart it holds.
    pub fn open(cache: Cache) -> Self {
        let mut store = Self::with_persistence(CachedCartPersistence::new(cache));
        store.restore();
        store
    }

    /// Reload the cart from persistence.
    ///
    /// Stored lines are normalized (see [`Cart::normalize`]) and totals are
    /// recomputed from them. Unreadable state falls back to an empty cart.
    pub fn restore(&mut self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        match persistence.load() {
            Ok(Some(mut cart)) => {
                let repaired = cart.normalize();
                if repaired > 0 {
                    tracing::warn!(repaired, "dropped or merged malformed cart lines");
                }
                tracing::debug!(lines = cart.items.len(), "restored cart");
                self.cart = cart;
            }
            Ok(None) => {
                self.cart = Cart::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to restore cart, starting empty");
                self.cart = Cart::new();
            }
        }
    }

    fn persist(&self) {
        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save(&self.cart) {
                tracing::warn!(error = %e, "failed to persist cart");
            }
        }
    }

    /// Add an item, merging into an existing line for the same product.
    pub fn add_item(&mut self, candidate: NewCartItem) -> LineItemId {
        let id = self.cart.add_item(candidate);
        tracing::debug!(line_item_id = %id, total_items = self.cart.total_items, "cart add");
        self.persist();
        id
    }

    /// Remove a line. Unknown ids are a no-op.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let removed = self.cart.remove_item(line_item_id);
        self.persist();
        removed
    }

    /// Set a line's quantity. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, line_item_id: &LineItemId, quantity: u32) -> bool {
        let found = self.cart.update_quantity(line_item_id, quantity);
        self.persist();
        found
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.persist();
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    /// Look up a line by product.
    pub fn item_for_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.cart.get_item_by_product(product_id)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Price the cart under `policy`.
    pub fn summary(&self, policy: &PricingPolicy) -> OrderSummary {
        policy.summarize(&self.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn candidate(product_id: u64, cents: i64, quantity: u32) -> NewCartItem {
        NewCartItem {
            product_id: ProductId::new(product_id),
            name: format!("Product {}", product_id),
            price: Money::new(cents),
            quantity,
            image_url: String::new(),
        }
    }

    struct FailingPersistence {
        saves: Arc<AtomicUsize>,
    }

    impl CartPersistence for FailingPersistence {
        fn load(&self) -> Result<Option<Cart>, CommerceError> {
            Err(CommerceError::StorageError("disk gone".to_string()))
        }

        fn save(&self, _cart: &Cart) -> Result<(), CommerceError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Err(CommerceError::StorageError("disk gone".to_string()))
        }
    }

    #[test]
    fn test_cart_survives_reload() {
        let cache = Cache::in_memory();
        let mut store = CartStore::open(cache.clone());
        store.add_item(candidate(1, 2000, 2));
        store.add_item(candidate(2, 1500, 1));

        let reopened = CartStore::open(cache);
        assert_eq!(reopened.cart(), store.cart());
        assert_eq!(reopened.cart().total_amount, Money::from_dollars(55));
    }

    #[test]
    fn test_persisted_envelope_shape() {
        let cache = Cache::in_memory();
        let mut store = CartStore::open(cache.clone());
        store.add_item(candidate(7, 999, 1));

        let raw: serde_json::Value = cache.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw["version"], 0);
        assert_eq!(raw["state"]["totalItems"], 1);
        assert_eq!(raw["state"]["items"][0]["productId"], 7);
        assert_eq!(raw["state"]["items"][0]["price"], 9.99);
    }

    #[test]
    fn test_restore_recomputes_tampered_totals() {
        let cache = Cache::in_memory();
        let tampered = serde_json::json!({
            "state": {
                "items": [{"id": 5, "productId": 1, "name": "Tee", "price": 12.5, "quantity": 4}],
                "totalAmount": 0.01,
                "totalItems": 1000
            },
            "version": 0
        });
        cache.set(CART_STORAGE_KEY, &tampered).unwrap();

        let store = CartStore::open(cache);
        assert_eq!(store.cart().total_amount, Money::from_dollars(50));
        assert_eq!(store.cart().total_items, 4);
    }

    #[test]
    fn test_restore_drops_empty_lines_and_merges_repeats() {
        let cache = Cache::in_memory();
        let stored = serde_json::json!({
            "state": {
                "items": [
                    {"id": 5, "productId": 1, "name": "Tee", "price": 12.5, "quantity": 1},
                    {"id": 6, "productId": 2, "name": "Cap", "price": 8, "quantity": 0},
                    {"id": 7, "productId": 1, "name": "Tee", "price": 12.5, "quantity": 2}
                ]
            },
            "version": 0
        });
        cache.set(CART_STORAGE_KEY, &stored).unwrap();

        let mut store = CartStore::open(cache);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.cart().total_items, 3);
        assert_eq!(store.cart().total_amount, Money::new(3750));

        // Later adds keep merging into the surviving line.
        store.add_item(candidate(1, 1250, 1));
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.cart().total_items, 4);
    }

    #[test]
    fn test_corrupt_state_restores_empty() {
        let cache = Cache::in_memory();
        cache.set(CART_STORAGE_KEY, &"not a cart").unwrap();

        let store = CartStore::open(cache);
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_failure_keeps_in_memory_mutation() {
        let saves = Arc::new(AtomicUsize::new(0));
        let mut store = CartStore::with_persistence(FailingPersistence {
            saves: saves.clone(),
        });
        store.restore();
        assert!(store.is_empty());

        let id = store.add_item(candidate(1, 500, 3));
        assert_eq!(store.cart().total_items, 3);
        store.update_quantity(&id, 1);
        assert_eq!(store.cart().total_items, 1);
        assert_eq!(saves.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear_persists_empty_cart() {
        let cache = Cache::in_memory();
        let mut store = CartStore::open(cache.clone());
        store.add_item(candidate(1, 500, 3));
        store.clear();

        let reopened = CartStore::open(cache);
        assert!(reopened.is_empty());
        assert!(reopened.cart().total_amount.is_zero());
    }

    #[test]
    fn test_summary_uses_policy() {
        let mut store = CartStore::new();
        store.add_item(candidate(1, 6000, 2));
        let summary = store.summary(&PricingPolicy::default());
        assert!(summary.has_free_shipping());
        assert_eq!(summary.tax, Money::new(840));
    }
}
