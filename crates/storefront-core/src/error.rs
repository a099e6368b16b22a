//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The `Display` text of the validation variants is the message shown to the
/// shopper, so keep it short and user-facing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(i64),

    /// Invalid monetary amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Form validation failed.
    #[error("{0}")]
    Validation(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Payment details rejected before tokenization.
    #[error("Invalid payment details: {0}")]
    InvalidPaymentDetails(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}
