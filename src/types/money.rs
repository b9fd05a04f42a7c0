//! Money types with precision guarantees for financial calculations.
//!
//! # Design Rationale
//! All monetary values use `Decimal` to avoid floating-point errors.
//! We define newtypes for semantic clarity and type safety. Every emitted
//! boundary value rounds half-up to two fractional digits; intermediate
//! arithmetic stays on bare `Decimal` at full precision and only becomes
//! a `Money` at the point a stage actually emits a response field.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Represents a monetary amount, always carried at 2-decimal precision
/// using half-up rounding at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(dec!(0));

    /// Construct from a full-precision decimal, rounding half-up to cents.
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Money(round_half_up(value, 2))
    }

    /// Construct without rounding. Used when rewrapping an already-rounded
    /// value (e.g. deserializing a stored `Money`).
    #[inline]
    pub fn from_rounded(value: Decimal) -> Self {
        Money(value)
    }

    /// Create from cents (integer)
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Get the raw decimal value
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if value is negative
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < dec!(0)
    }

    /// Check if value is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == dec!(0)
    }

    /// Return the maximum of two values
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }

    /// Return the minimum of two values
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    /// Clamp value to zero (no negatives). Every emitted monetary field
    /// passes through this before leaving the pipeline.
    #[inline]
    pub fn clamp_zero(self) -> Self {
        self.max(Money::ZERO)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl Add for Money {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Decimal) -> Self::Output {
        Money(self.0 * rhs)
    }
}

impl Div<Decimal> for Money {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Decimal) -> Self::Output {
        Money(self.0 / rhs)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Round `value` to `dp` fractional digits, half-up (ties away from zero).
/// This is the rounding strategy mandated for every emitted boundary field;
/// it differs from `Decimal::round_dp`'s default banker's rounding.
#[inline]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Represents a rate (commission rate, Lehman tier rate, etc.) as a decimal
/// fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(dec!(0));

    /// Create a rate from decimal form (e.g., 0.05 for 5%)
    #[inline]
    pub fn from_decimal(value: Decimal) -> Self {
        Rate(value)
    }

    /// Get the decimal value
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Whether the rate falls within the valid `[0, 1]` range required of
    /// every rate field in the input (fixed, preferred, Lehman tier).
    #[inline]
    pub fn is_valid_fraction(&self) -> bool {
        self.0 >= dec!(0) && self.0 <= dec!(1)
    }

    /// Apply this rate to a full-precision decimal basis, returning a
    /// full-precision decimal (not yet rounded to `Money`).
    #[inline]
    pub fn apply(&self, basis: Decimal) -> Decimal {
        basis * self.0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::ZERO
    }
}
