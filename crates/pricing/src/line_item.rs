use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodflow_core::{DomainError, DomainResult, ValueObject};

/// One product entry in a cart: name, unit price, quantity.
///
/// Fields are public so a cart can be deserialized straight from the UI; the
/// calculator re-validates every item before using it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> DomainResult<Self> {
        let item = Self {
            name: name.into(),
            unit_price,
            quantity,
        };
        item.validate()?;
        Ok(item)
    }

    /// Invariant: `unit_price >= 0` and `quantity >= 1`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::invalid_line_item(format!(
                "'{}': unit price must not be negative (got {})",
                self.name, self.unit_price
            )));
        }
        if self.quantity == 0 {
            return Err(DomainError::invalid_line_item(format!(
                "'{}': quantity must be at least 1",
                self.name
            )));
        }
        Ok(())
    }

    /// Exact (unrounded) `unit_price × quantity`.
    pub fn line_total(&self) -> DomainResult<Decimal> {
        self.validate()?;
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| DomainError::invariant("line total overflow"))
    }

    /// Same line with a different quantity (line items are never mutated).
    pub fn with_quantity(&self, quantity: u32) -> DomainResult<Self> {
        Self::new(self.name.clone(), self.unit_price, quantity)
    }

    /// Display label used by order summaries, e.g. `"2x Garlic Bread"`.
    pub fn label(&self) -> String {
        format!("{}x {}", self.quantity, self.name)
    }
}

impl ValueObject for LineItem {}
