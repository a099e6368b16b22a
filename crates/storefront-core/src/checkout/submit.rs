//! Order submission: create the order, then capture payment against it.
//!
//! The two calls are sequential and not transactional. If capture fails the
//! order stays pending and unpaid on the server; nothing here cancels or
//! retries it. No idempotency key is sent, so resubmitting after a timeout
//! can create a duplicate order.

use crate::cart::CartStore;
use crate::checkout::{
    CheckoutFlow, CreateOrderRequest, Order, PaymentCapture, PaymentRequest,
};
use crate::error::CommerceError;
use crate::ids::OrderId;
use async_trait::async_trait;
use thiserror::Error;

/// Fallback message when order creation fails without a server message.
pub const MSG_ORDER_FAILED: &str = "Failed to create order";
/// Fallback message when capture fails without a server message.
pub const MSG_PAYMENT_FAILED: &str = "Payment processing failed";

/// Error reported by an [`OrderGateway`] call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    /// Server or transport message.
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn message_or(&self, fallback: &str) -> String {
        if self.message.trim().is_empty() {
            fallback.to_string()
        } else {
            self.message.clone()
        }
    }
}

/// Backend endpoints used by checkout.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// `POST /orders`
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, GatewayError>;

    /// `POST /orders/:id/payment`
    async fn capture_payment(
        &self,
        order_id: OrderId,
        request: &PaymentRequest,
    ) -> Result<PaymentCapture, GatewayError>;
}

/// Why a submission did not complete.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Rejected before any network call.
    #[error("{0}")]
    Invalid(#[from] CommerceError),

    /// Order creation failed; nothing was charged.
    #[error("{0}")]
    OrderCreation(String),

    /// The order exists but payment capture failed.
    #[error("{message}")]
    PaymentCapture { order_id: OrderId, message: String },
}

impl SubmitError {
    /// Id of an order left unpaid on the server, if any.
    pub fn orphaned_order(&self) -> Option<OrderId> {
        match self {
            SubmitError::PaymentCapture { order_id, .. } => Some(*order_id),
            _ => None,
        }
    }
}

/// A fully paid order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// The created order.
    pub order: Order,
    /// Client secret returned by capture.
    pub client_secret: String,
    /// Where to send the shopper next.
    pub redirect_path: String,
}

/// Runs a checkout submission against an [`OrderGateway`].
pub struct OrderSubmitter<'a, G: OrderGateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: OrderGateway + ?Sized> OrderSubmitter<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Submit the flow's order for the cart in `cart`.
    ///
    /// The cart is cleared only when both calls succeed. Any failure moves
    /// the flow to [`crate::checkout::CheckoutStep::Failed`] with the error
    /// message, except validation failures, which leave the step unchanged.
    pub async fn submit(
        &self,
        flow: &mut CheckoutFlow,
        cart: &mut CartStore,
    ) -> Result<OrderConfirmation, SubmitError> {
        let pending = flow.begin_submission(cart.cart())?;
        tracing::info!(
            lines = pending.request.items.len(),
            total = %pending.request.total_amount,
            method = pending.request.payment_method.as_str(),
            "creating order"
        );

        let order = match self.gateway.create_order(&pending.request).await {
            Ok(order) => order,
            Err(e) => {
                let message = e.message_or(MSG_ORDER_FAILED);
                tracing::warn!(error = %message, "order creation failed");
                flow.mark_failed(message.clone());
                return Err(SubmitError::OrderCreation(message));
            }
        };

        let payment = PaymentRequest {
            payment_method_id: pending.instrument,
        };
        let capture = match self.gateway.capture_payment(order.id, &payment).await {
            Ok(capture) => capture,
            Err(e) => {
                let message = e.message_or(MSG_PAYMENT_FAILED);
                tracing::warn!(
                    order_id = %order.id,
                    error = %message,
                    "payment capture failed, order left unpaid"
                );
                flow.mark_failed(message.clone());
                return Err(SubmitError::PaymentCapture {
                    order_id: order.id,
                    message,
                });
            }
        };

        cart.clear();
        flow.mark_submitted();
        tracing::info!(order_id = %order.id, "order placed");

        Ok(OrderConfirmation {
            redirect_path: order.view_path(),
            client_secret: capture.client_secret,
            order,
        })
    }
}
