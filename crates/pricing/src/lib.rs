//! Pricing module: line items, fee/tax rules, promotions and the pure
//! cart-to-total calculator.
//!
//! Everything here is a pure function of its inputs (no IO, no shared state),
//! so breakdowns can be recomputed on demand by any caller.

pub mod breakdown;
pub mod discount;
pub mod line_item;
pub mod rules;

pub use breakdown::{PricingBreakdown, compute_breakdown};
pub use discount::{DiscountRule, PromoBook, Promotion};
pub use line_item::LineItem;
pub use rules::{PricingRules, TaxRate};
