use serde::{Deserialize, Serialize};

use foodflow_core::{DomainError, DomainResult, ValueObject};
use foodflow_pricing::{LineItem, PricingBreakdown, PricingRules};

/// Something the customer did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Add a line; merges into an existing line with the same name and price.
    Add { item: LineItem },
    SetQuantity { index: usize, quantity: u32 },
    Remove { index: usize },
    Clear,
}

/// Cart contents as an immutable value.
///
/// The UI owns the current cart and replaces it with the result of
/// [`Cart::reduce`]; a failed action leaves the caller's cart untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines (the header badge count).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn reduce(&self, action: CartAction) -> DomainResult<Cart> {
        let mut lines = self.lines.clone();
        match action {
            CartAction::Add { item } => {
                item.validate()?;
                let existing = lines
                    .iter()
                    .position(|l| l.name == item.name && l.unit_price == item.unit_price);
                match existing {
                    Some(i) => {
                        let quantity = lines[i]
                            .quantity
                            .checked_add(item.quantity)
                            .ok_or_else(|| DomainError::invalid_line_item("quantity overflow"))?;
                        lines[i] = lines[i].with_quantity(quantity)?;
                    }
                    None => lines.push(item),
                }
            }
            CartAction::SetQuantity { index, quantity } => {
                let line = lines.get(index).ok_or_else(DomainError::not_found)?;
                lines[index] = line.with_quantity(quantity)?;
            }
            CartAction::Remove { index } => {
                if index >= lines.len() {
                    return Err(DomainError::not_found());
                }
                lines.remove(index);
            }
            CartAction::Clear => lines.clear(),
        }
        Ok(Cart { lines })
    }

    pub fn quote(&self, rules: &PricingRules) -> DomainResult<PricingBreakdown> {
        rules.quote(&self.lines)
    }
}

impl ValueObject for Cart {}

impl FromIterator<LineItem> for Cart {
    fn from_iter<T: IntoIterator<Item = LineItem>>(iter: T) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
