//! Runtime configuration loaded from the environment.

use core::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use foodflow_pricing::{DiscountRule, PricingRules, PromoBook, Promotion};

pub const DELIVERY_FEE_ENV: &str = "FOODFLOW_DELIVERY_FEE";
pub const TAX_RATE_ENV: &str = "FOODFLOW_TAX_RATE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pricing: PricingRules,
    pub promos: PromoBook,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing keys fall back to the storefront
    /// defaults, malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PricingRules::default();
        let fee = decimal_or(&lookup, DELIVERY_FEE_ENV, defaults.delivery_fee.amount())?;
        let rate = decimal_or(&lookup, TAX_RATE_ENV, defaults.tax_rate.as_decimal())?;

        let pricing = PricingRules::new(fee, rate).context("invalid pricing configuration")?;
        Ok(Self {
            pricing,
            promos: default_promos()?,
        })
    }
}

fn decimal_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal> {
    match lookup(key) {
        Some(raw) => Decimal::from_str(raw.trim())
            .with_context(|| format!("{key}={raw:?} is not a number")),
        None => {
            tracing::debug!(key, %default, "not set; using default");
            Ok(default)
        }
    }
}

/// Promo codes accepted by the demo storefront.
pub fn default_promos() -> Result<PromoBook> {
    Ok(PromoBook::new()
        .with(Promotion::new(
            "WELCOME10",
            DiscountRule::Percentage(Decimal::new(10, 2)),
        )?)
        .with(Promotion::new(
            "FIVEOFF",
            DiscountRule::FixedAmount(Decimal::new(500, 2)),
        )?))
}
