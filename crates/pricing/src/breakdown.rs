use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodflow_core::{DomainError, DomainResult, Money, ValueObject};

use crate::discount::DiscountRule;
use crate::line_item::LineItem;
use crate::rules::PricingRules;

/// Derived totals for a cart or order.
///
/// Every amount is rounded to cents and the components reconcile exactly:
/// - `subtotal == items_subtotal - discount`
/// - `total == subtotal + delivery_fee + taxes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// `Σ unit_price × quantity` before any promotion.
    pub items_subtotal: Money,
    pub discount: Money,
    /// Item subtotal after the promotion; the amount taxes are charged on.
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub taxes: Money,
    pub total: Money,
}

impl PricingBreakdown {
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}

impl ValueObject for PricingBreakdown {}

/// Compute the breakdown for `items` with a flat delivery fee and a tax rate.
///
/// Fails with `InvalidLineItem`, `InvalidDeliveryFee` or `InvalidTaxRate`
/// before doing any arithmetic if an input is out of range.
pub fn compute_breakdown(
    items: &[LineItem],
    delivery_fee: Decimal,
    tax_rate: Decimal,
) -> DomainResult<PricingBreakdown> {
    PricingRules::new(delivery_fee, tax_rate)?.quote(items)
}

pub(crate) fn compute(
    items: &[LineItem],
    rules: &PricingRules,
    discount: Option<&DiscountRule>,
) -> DomainResult<PricingBreakdown> {
    // Validate everything up front so no partial arithmetic happens on bad input.
    for item in items {
        item.validate()?;
    }
    if let Some(rule) = discount {
        rule.validate()?;
    }

    let mut exact = Decimal::ZERO;
    for item in items {
        exact = exact
            .checked_add(item.line_total()?)
            .ok_or_else(|| DomainError::invariant("subtotal overflow"))?;
    }
    let exact = Money::new(exact)?;
    let items_subtotal = exact.rounded();

    let discount = match discount {
        Some(rule) => rule.amount_off(exact)?.rounded().min(items_subtotal),
        None => Money::ZERO,
    };
    let subtotal = items_subtotal.saturating_sub(discount);

    let taxes = subtotal
        .amount()
        .checked_mul(rules.tax_rate.as_decimal())
        .ok_or_else(|| DomainError::invariant("tax overflow"))?;
    let taxes = Money::new(taxes)?.rounded();

    let delivery_fee = rules.delivery_fee.rounded();
    let total = subtotal.checked_add(delivery_fee)?.checked_add(taxes)?;

    Ok(PricingBreakdown {
        items_subtotal,
        discount,
        subtotal,
        delivery_fee,
        taxes,
        total,
    })
}
