use core::str::FromStr;

use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use serde::Serialize;

use foodflow_core::Money;
use foodflow_ordering::{OrderStatus, OrderTracker, StepState};
use foodflow_pricing::{LineItem, PricingBreakdown};

use crate::config::AppConfig;

/// Parse `NAME:PRICE:QTY`. The name may itself contain colons.
pub fn parse_item(raw: &str) -> Result<LineItem> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(qty), Some(price), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(anyhow!("item '{raw}' must look like NAME:PRICE:QTY"));
    };
    let unit_price = Decimal::from_str(price.trim().trim_start_matches('$'))
        .with_context(|| format!("item '{raw}': invalid price"))?;
    let quantity = qty
        .trim()
        .parse::<u32>()
        .with_context(|| format!("item '{raw}': invalid quantity"))?;
    Ok(LineItem::new(name.trim(), unit_price, quantity)?)
}

#[derive(Debug, Serialize)]
pub struct Quote {
    pub items: Vec<LineItem>,
    pub promo_code: Option<String>,
    pub breakdown: PricingBreakdown,
}

pub fn quote(config: &AppConfig, items: &[String], promo: Option<&str>) -> Result<Quote> {
    let items = items
        .iter()
        .map(|raw| parse_item(raw))
        .collect::<Result<Vec<_>>>()?;
    let promotion = config.promos.resolve(promo)?;
    let breakdown = config
        .pricing
        .quote_with_discount(&items, promotion.map(|p| p.rule()))?;

    tracing::info!(
        lines = items.len(),
        subtotal = %breakdown.subtotal,
        discount = %breakdown.discount,
        total = %breakdown.total,
        "computed quote"
    );

    Ok(Quote {
        items,
        promo_code: promotion.map(|p| p.code().to_string()),
        breakdown,
    })
}

pub fn render_quote(quote: &Quote) -> Result<String> {
    let b = &quote.breakdown;
    let mut out = String::new();
    for item in &quote.items {
        let line_total = Money::new(item.line_total()?)?.rounded();
        out.push_str(&format!(
            "{:<32} {:>10}\n",
            format!("{} x {}", item.name, item.quantity),
            line_total.to_string()
        ));
    }
    out.push_str(&format!("{:<32} {:>10}\n", "Subtotal", b.items_subtotal.to_string()));
    if b.has_discount() {
        let label = format!("Promo {}", quote.promo_code.as_deref().unwrap_or_default());
        out.push_str(&format!("{:<32} {:>10}\n", label, format!("-{}", b.discount)));
    }
    out.push_str(&format!("{:<32} {:>10}\n", "Delivery Fee", b.delivery_fee.to_string()));
    out.push_str(&format!("{:<32} {:>10}\n", "Taxes", b.taxes.to_string()));
    out.push_str(&format!("{:<32} {:>10}\n", "Total", b.total.to_string()));
    Ok(out)
}

pub fn track(status: &str) -> Result<OrderTracker> {
    let status = OrderStatus::from_str(status)?;
    tracing::info!(status = %status, "rendering tracker");
    Ok(OrderTracker::for_status(status))
}

pub fn render_tracker(tracker: &OrderTracker) -> String {
    tracker
        .steps
        .iter()
        .map(|step| {
            let marker = match step.state {
                StepState::Completed => "[x]",
                StepState::Active => "[>]",
                StepState::Pending => "[ ]",
            };
            format!("{marker} {}", step.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn advance(status: &str) -> Result<OrderStatus> {
    let current = OrderStatus::from_str(status)?;
    let next = current.advance()?;
    tracing::info!(from = %current, to = %next, "advanced status");
    Ok(next)
}
