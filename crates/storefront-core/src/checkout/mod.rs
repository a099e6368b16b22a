//! Checkout module.
//!
//! Contains the checkout flow, addresses, payment instruments, orders, and
//! the order submission pipeline.

mod address;
mod flow;
mod order;
mod payment;
mod submit;

pub use address::{Address, AddressField, DEFAULT_COUNTRY};
pub use flow::{
    CheckoutFlow, CheckoutStep, PendingSubmission, MSG_INVALID_PAYMENT, MSG_REQUIRED_FIELDS,
};
pub use order::{
    order_view_path, CreateOrderRequest, Order, OrderItem, OrderStatus, PaymentCapture,
    PaymentRequest, PaymentStatus,
};
pub use payment::{
    CardDetails, DemoCollector, PaymentCollector, PaymentInstrumentToken, PaymentMethod,
};
pub use submit::{
    GatewayError, OrderConfirmation, OrderGateway, OrderSubmitter, SubmitError,
    MSG_ORDER_FAILED, MSG_PAYMENT_FAILED,
};
