//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The store trades in a
//! single currency (USD); on the wire amounts travel as JSON decimal numbers
//! (`19.99`) and are rounded to the nearest cent when decoded.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: &str = "$";

/// A monetary value in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "f64", try_from = "f64")]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_core::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// Create a Money value from whole dollars.
    pub const fn from_dollars(dollars: i64) -> Self {
        Self::new(dollars * 100)
    }

    /// Create a Money value from whole dollars, returning `None` on overflow.
    pub fn checked_from_dollars(dollars: i64) -> Option<Self> {
        dollars.checked_mul(100).map(Self::new)
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, CURRENCY_SYMBOL, self.display_amount_abs())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}", sign, self.display_amount_abs())
    }

    fn display_amount_abs(&self) -> String {
        let abs = self.amount_cents.unsigned_abs();
        format!("{}.{:02}", abs / 100, abs % 100)
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_sub(other.amount_cents).map(Money::new)
    }

    /// Checked multiplication by a quantity.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).map(Money::new)
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }

    /// Calculate a percentage of this amount, rounded to the nearest cent.
    pub fn percentage(&self, percent: f64) -> Money {
        Money::new((self.amount_cents as f64 * percent / 100.0).round() as i64)
    }

    /// Sum values, returning `None` on overflow.
    pub fn try_sum<'a>(iter: impl IntoIterator<Item = &'a Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(*m))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_mul(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.to_decimal()
    }
}

impl TryFrom<f64> for Money {
    type Error = CommerceError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        if !amount.is_finite() {
            return Err(CommerceError::InvalidAmount(amount.to_string()));
        }
        if amount.abs() * 100.0 >= i64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        Ok(Money::from_decimal(amount))
    }
}
