//! Checkout flow state machine.
//!
//! Two form steps, billing then payment, followed by a terminal
//! [`CheckoutStep::Submitted`] or a recoverable [`CheckoutStep::Failed`].
//! The flow owns the form state; the cart is only read when a submission
//! begins.

use crate::cart::Cart;
use crate::checkout::{
    Address, AddressField, CreateOrderRequest, PaymentInstrumentToken, PaymentMethod,
};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Message recorded when billing is incomplete.
pub const MSG_REQUIRED_FIELDS: &str = "Please fill in all required fields";
/// Message recorded when no payment instrument was captured.
pub const MSG_INVALID_PAYMENT: &str = "Please enter valid payment information";

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Billing address form.
    #[default]
    Billing,
    /// Payment method and instrument.
    Payment,
    /// Order created and paid.
    Submitted,
    /// Submission failed; form state and error are kept.
    Failed,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Billing => "billing",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Submitted => "submitted",
            CheckoutStep::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Billing => "Billing",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Submitted => "Submitted",
            CheckoutStep::Failed => "Failed",
        }
    }

    /// Form step number shown to the shopper (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Billing => 1,
            CheckoutStep::Payment | CheckoutStep::Failed => 2,
            CheckoutStep::Submitted => 3,
        }
    }
}

/// Everything the submission pipeline needs from a ready flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    /// Body for order creation.
    pub request: CreateOrderRequest,
    /// Instrument to capture against the new order.
    pub instrument: PaymentInstrumentToken,
}

/// Checkout flow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    billing_address: Address,
    /// `None` while shipping is the same as billing.
    shipping_address: Option<Address>,
    shipping_same_as_billing: bool,
    payment_method: PaymentMethod,
    instrument: Option<PaymentInstrumentToken>,
    error: Option<String>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Create a new checkout flow at the billing step.
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Billing,
            billing_address: Address::default(),
            shipping_address: None,
            shipping_same_as_billing: true,
            payment_method: PaymentMethod::default(),
            instrument: None,
            error: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Last recorded error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn billing_address(&self) -> &Address {
        &self.billing_address
    }

    /// The independent shipping address, if one is being edited.
    pub fn shipping_address(&self) -> Option<&Address> {
        self.shipping_address.as_ref()
    }

    pub fn shipping_same_as_billing(&self) -> bool {
        self.shipping_same_as_billing
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Whether a payment instrument has been captured.
    pub fn has_instrument(&self) -> bool {
        self.instrument.is_some()
    }

    /// Edit a billing field.
    pub fn update_billing(&mut self, field: AddressField, value: impl Into<String>) {
        self.billing_address.set_field(field, value);
    }

    /// Replace the whole billing address.
    pub fn set_billing_address(&mut self, address: Address) {
        self.billing_address = address;
    }

    /// Edit a shipping field. Ignored while shipping is the same as billing;
    /// returns whether the edit was applied.
    pub fn update_shipping(&mut self, field: AddressField, value: impl Into<String>) -> bool {
        match (&mut self.shipping_address, self.shipping_same_as_billing) {
            (Some(address), false) => {
                address.set_field(field, value);
                true
            }
            _ => false,
        }
    }

    /// Toggle "shipping same as billing".
    ///
    /// Turning it off starts the shipping address as a copy of the current
    /// billing address; turning it on discards the shipping address.
    pub fn set_shipping_same_as_billing(&mut self, same: bool) {
        if same == self.shipping_same_as_billing {
            return;
        }
        self.shipping_same_as_billing = same;
        self.shipping_address = if same {
            None
        } else {
            Some(self.billing_address.clone())
        };
    }

    /// Address the order ships to.
    pub fn effective_shipping_address(&self) -> Address {
        match (&self.shipping_address, self.shipping_same_as_billing) {
            (Some(address), false) => address.clone(),
            _ => self.billing_address.clone(),
        }
    }

    /// Check whether the billing step can be left.
    pub fn can_advance(&self) -> bool {
        self.step == CheckoutStep::Billing && self.billing_address.is_complete()
    }

    /// Move from billing to payment.
    ///
    /// On incomplete billing the flow stays put and records the validation
    /// message.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        if self.step != CheckoutStep::Billing {
            return Err(self.invalid_transition(CheckoutStep::Payment));
        }

        if !self.billing_address.is_complete() {
            let missing = self.billing_address.missing_fields();
            tracing::debug!(?missing, "billing incomplete");
            return Err(self.fail_validation(CommerceError::Validation(
                MSG_REQUIRED_FIELDS.to_string(),
            )));
        }

        self.error = None;
        self.transition(CheckoutStep::Payment);
        Ok(self.step)
    }

    /// Go back to billing from payment or from a failed submission.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        match self.step {
            CheckoutStep::Payment | CheckoutStep::Failed => {
                self.transition(CheckoutStep::Billing);
                Ok(self.step)
            }
            _ => Err(self.invalid_transition(CheckoutStep::Billing)),
        }
    }

    /// Select the payment method. Switching methods drops any captured
    /// instrument.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        if method != self.payment_method {
            self.payment_method = method;
            self.instrument = None;
        }
    }

    /// Store the instrument produced by a payment collector.
    pub fn capture_instrument(&mut self, token: PaymentInstrumentToken) {
        self.instrument = Some(token);
    }

    /// Validate the payment step against `cart` and build the submission.
    ///
    /// Allowed from [`CheckoutStep::Payment`] and, for a retry, from
    /// [`CheckoutStep::Failed`]. Validation failures are recorded on the flow
    /// and returned; no state changes otherwise.
    pub fn begin_submission(&mut self, cart: &Cart) -> Result<PendingSubmission, CommerceError> {
        if !matches!(self.step, CheckoutStep::Payment | CheckoutStep::Failed) {
            return Err(self.invalid_transition(CheckoutStep::Submitted));
        }

        if !self.billing_address.is_complete() {
            return Err(self.fail_validation(CommerceError::Validation(
                MSG_REQUIRED_FIELDS.to_string(),
            )));
        }

        let Some(instrument) = self.instrument.clone() else {
            return Err(self.fail_validation(CommerceError::Validation(
                MSG_INVALID_PAYMENT.to_string(),
            )));
        };

        if cart.is_empty() {
            return Err(self.fail_validation(CommerceError::EmptyCart));
        }

        self.error = None;
        let request = CreateOrderRequest::from_checkout(
            cart,
            self.effective_shipping_address(),
            self.billing_address.clone(),
            self.payment_method,
        );
        Ok(PendingSubmission {
            request,
            instrument,
        })
    }

    /// Record a completed order.
    pub fn mark_submitted(&mut self) {
        self.error = None;
        self.transition(CheckoutStep::Submitted);
    }

    /// Record a failed submission, keeping all form state.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.transition(CheckoutStep::Failed);
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Submitted
    }

    fn transition(&mut self, to: CheckoutStep) {
        tracing::debug!(from = self.step.as_str(), to = to.as_str(), "checkout transition");
        self.step = to;
    }

    fn fail_validation(&mut self, error: CommerceError) -> CommerceError {
        self.error = Some(error.to_string());
        error
    }

    fn invalid_transition(&self, to: CheckoutStep) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}
