use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodflow_core::{DomainError, DomainResult, Money};

use crate::breakdown::{PricingBreakdown, compute};
use crate::discount::DiscountRule;
use crate::line_item::LineItem;

/// Sales tax rate as a fraction in `[0, 1]` (0.08 is 8%).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub const ZERO: TaxRate = TaxRate(Decimal::ZERO);

    pub fn new(rate: Decimal) -> DomainResult<Self> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(DomainError::InvalidTaxRate(rate.to_string()));
        }
        Ok(Self(rate))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        TaxRate::new(value)
    }
}

impl From<TaxRate> for Decimal {
    fn from(value: TaxRate) -> Self {
        value.0
    }
}

/// Fee and tax rules applied to every cart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    pub delivery_fee: Money,
    pub tax_rate: TaxRate,
}

impl PricingRules {
    /// Flat delivery fee charged by the demo storefront.
    pub const DEFAULT_DELIVERY_FEE_CENTS: u64 = 500;

    /// Validate raw fee/rate inputs.
    pub fn new(delivery_fee: Decimal, tax_rate: Decimal) -> DomainResult<Self> {
        if delivery_fee < Decimal::ZERO {
            return Err(DomainError::InvalidDeliveryFee(delivery_fee.to_string()));
        }
        Ok(Self {
            delivery_fee: Money::new(delivery_fee)?,
            tax_rate: TaxRate::new(tax_rate)?,
        })
    }

    /// Breakdown without promotion.
    pub fn quote(&self, items: &[LineItem]) -> DomainResult<PricingBreakdown> {
        compute(items, self, None)
    }

    /// Breakdown with an optional discount applied before tax.
    pub fn quote_with_discount(
        &self,
        items: &[LineItem],
        discount: Option<&DiscountRule>,
    ) -> DomainResult<PricingBreakdown> {
        compute(items, self, discount)
    }
}

impl Default for PricingRules {
    /// $5.00 delivery, 8% tax.
    fn default() -> Self {
        Self {
            delivery_fee: Money::from_cents(Self::DEFAULT_DELIVERY_FEE_CENTS),
            tax_rate: TaxRate(Decimal::new(8, 2)),
        }
    }
}
