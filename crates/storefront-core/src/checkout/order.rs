//! Order types.
//!
//! Orders are created by the backend and read-only on the client; status
//! transitions are server-owned.

use crate::cart::{Cart, CartItem};
use crate::checkout::{Address, PaymentInstrumentToken, PaymentMethod};
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting payment or processing.
    #[default]
    Pending,
    /// Paid and being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No successful capture yet.
    #[default]
    Pending,
    /// Captured.
    Paid,
    /// Capture failed.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
        }
    }
}

/// A line of an order, snapshotted from the cart at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Server-side row id; absent in create requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name at time of order.
    pub name: String,
    /// Unit price at time of order.
    pub price: Money,
    /// Quantity.
    pub quantity: u32,
}

impl OrderItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            id: None,
            product_id: item.product_id,
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// An order as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Amount the order was placed for.
    pub total_amount: Money,
    /// Fulfilment status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Payment status.
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Payment method tag.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    /// Shipping address.
    pub shipping_address: Address,
    /// Billing address.
    pub billing_address: Address,
    /// Creation time (UTC, no offset on the wire).
    pub created_at: NaiveDateTime,
}

impl Order {
    /// Path of the order view.
    pub fn view_path(&self) -> String {
        order_view_path(self.id)
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Whether payment has been captured.
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// Path of the view for order `id`.
pub fn order_view_path(id: OrderId) -> String {
    format!("/orders/{}", id)
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Snapshotted lines.
    pub items: Vec<OrderItem>,
    /// Cart subtotal; the backend owns final pricing.
    pub total_amount: Money,
    /// Where to ship.
    pub shipping_address: Address,
    /// Billing address.
    pub billing_address: Address,
    /// Payment method tag.
    pub payment_method: PaymentMethod,
}

impl CreateOrderRequest {
    /// Build a request from the cart and the checkout form.
    pub fn from_checkout(
        cart: &Cart,
        shipping_address: Address,
        billing_address: Address,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            items: cart.items.iter().map(OrderItem::from).collect(),
            total_amount: cart.total_amount,
            shipping_address,
            billing_address,
            payment_method,
        }
    }
}

/// Body of `POST /orders/:id/payment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Instrument token.
    pub payment_method_id: PaymentInstrumentToken,
}

/// Result of a successful payment capture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCapture {
    /// Client secret for completing the payment client-side.
    pub client_secret: String,
    /// Echoed order id.
    #[serde(default)]
    pub order_id: Option<OrderId>,
}
