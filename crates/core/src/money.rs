//! Non-negative monetary amounts.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Number of decimal places amounts are displayed (and settled) with.
pub const CENT_SCALE: u32 = 2;

/// Round half-up to whole cents.
///
/// Amounts handled here are never negative, so "away from zero" is half-up.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// A non-negative amount of money in the store currency.
///
/// The amount is kept at full `Decimal` precision; rounding to cents happens
/// explicitly through [`Money::rounded`] or when the value is displayed.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "money amount must not be negative (got {amount})"
            )));
        }
        Ok(Self(amount))
    }

    pub fn from_cents(cents: u64) -> Self {
        // u64 cents always fit in a Decimal mantissa.
        Self(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The amount rounded half-up to whole cents.
    pub fn rounded(&self) -> Self {
        Self(round_to_cents(self.0))
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money amount overflow"))
    }

    /// Subtraction that stops at zero.
    pub fn saturating_sub(self, other: Money) -> Money {
        if other.0 >= self.0 {
            Money::ZERO
        } else {
            Money(self.0 - other.0)
        }
    }
}

impl ValueObject for Money {}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${:.2}", round_to_cents(self.0))
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Accepts `12.99` and `$12.99`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let amount = Decimal::from_str(digits)
            .map_err(|e| DomainError::validation(format!("invalid amount '{s}': {e}")))?;
        Money::new(amount)
    }
}
