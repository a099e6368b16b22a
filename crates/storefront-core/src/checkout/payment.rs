//! Payment methods and instrument tokenization.
//!
//! Raw card details never leave this module: a [`PaymentCollector`] turns
//! them into an opaque [`PaymentInstrumentToken`], which is what the backend
//! receives as `paymentMethodId`.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment.
    #[default]
    CreditCard,
    /// PayPal redirect.
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Paypal => "PayPal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit_card" | "card" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            other => Err(CommerceError::Validation(format!(
                "Unknown payment method: {}",
                other
            ))),
        }
    }
}

/// Opaque token standing in for a captured payment instrument.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentInstrumentToken(String);

impl PaymentInstrumentToken {
    /// Wrap a token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self, CommerceError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CommerceError::InvalidPaymentDetails(
                "empty payment token".to_string(),
            ));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentInstrumentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card details as typed by the shopper.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    /// Card number, possibly with spaces.
    pub number: String,
    /// Expiry as typed (e.g. "12/27").
    pub expiry: String,
    /// Security code.
    pub cvc: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("last4", &self.last4())
            .finish_non_exhaustive()
    }
}

impl CardDetails {
    /// Create card details.
    pub fn new(
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }

    /// Card number with whitespace removed.
    pub fn digits(&self) -> String {
        self.number.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Last four digits, if the number is long enough.
    pub fn last4(&self) -> Option<String> {
        let digits = self.digits();
        let len = digits.chars().count();
        if len < 4 {
            return None;
        }
        Some(digits.chars().skip(len - 4).collect())
    }
}

/// Turns payment input into an instrument token.
pub trait PaymentCollector {
    /// Tokenize a card.
    fn collect_card(&self, card: &CardDetails) -> Result<PaymentInstrumentToken, CommerceError>;

    /// Token for a redirect-based PayPal payment.
    fn collect_paypal(&self) -> Result<PaymentInstrumentToken, CommerceError>;
}

/// Development collector that fabricates tokens locally.
///
/// Accepts any card number of 12 to 19 digits. Never use it against a real
/// payment backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCollector;

impl PaymentCollector for DemoCollector {
    fn collect_card(&self, card: &CardDetails) -> Result<PaymentInstrumentToken, CommerceError> {
        let digits = card.digits();
        if !digits.chars().all(|c| c.is_ascii_digit()) || !(12..=19).contains(&digits.len()) {
            return Err(CommerceError::InvalidPaymentDetails(
                "card number must be 12-19 digits".to_string(),
            ));
        }
        let last4 = &digits[digits.len() - 4..];
        PaymentInstrumentToken::new(format!("pm_demo_{}", last4))
    }

    fn collect_paypal(&self) -> Result<PaymentInstrumentToken, CommerceError> {
        PaymentInstrumentToken::new("pm_paypal_redirect")
    }
}
