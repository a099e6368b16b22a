//! Order summary pricing: shipping and tax on top of the cart subtotal.

use crate::cart::Cart;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Shipping and tax rules applied to a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    /// Shipping charged at or below the threshold.
    pub flat_shipping: Money,
    /// Sales tax, in percent of the subtotal.
    pub tax_rate_percent: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::from_dollars(100),
            flat_shipping: Money::from_dollars(10),
            tax_rate_percent: 7.0,
        }
    }
}

impl PricingPolicy {
    /// Shipping due on `subtotal`.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping
        }
    }

    /// Tax due on `subtotal`, rounded to the cent.
    pub fn tax_for(&self, subtotal: Money) -> Money {
        subtotal.percentage(self.tax_rate_percent)
    }

    /// Price a cart.
    pub fn summarize(&self, cart: &Cart) -> OrderSummary {
        let subtotal = cart.total_amount;
        let shipping = self.shipping_for(subtotal);
        let tax = self.tax_for(subtotal);
        OrderSummary {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            item_count: cart.total_items,
        }
    }
}

/// What the checkout sidebar shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Cart subtotal.
    pub subtotal: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Sales tax.
    pub tax: Money,
    /// Subtotal plus shipping plus tax.
    pub total: Money,
    /// Number of units.
    pub item_count: u64,
}

impl OrderSummary {
    /// Whether shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
