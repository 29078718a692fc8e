use serde::{Deserialize, Deserializer, Serialize};

use foodflow_core::{DomainError, DomainResult, Entity, MenuItemId, Money, RestaurantId};
use foodflow_pricing::LineItem;

/// One selectable option with its price surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    pub surcharge: Money,
}

impl Choice {
    pub fn new(id: impl Into<String>, label: impl Into<String>, surcharge: Money) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            surcharge,
        }
    }
}

/// Customization dialog for a dish: one size (single choice with a default)
/// and any number of extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationOptions {
    pub sizes: Vec<Choice>,
    pub default_size: String,
    pub extras: Vec<Choice>,
}

impl CustomizationOptions {
    /// Regular / Large (+$2.00) with Extra Cheese (+$1.00) and Bacon (+$1.50).
    pub fn standard() -> Self {
        Self {
            sizes: vec![
                Choice::new("regular", "Regular", Money::ZERO),
                Choice::new("large", "Large", Money::from_cents(200)),
            ],
            default_size: "regular".to_string(),
            extras: vec![
                Choice::new("extra-cheese", "Extra Cheese", Money::from_cents(100)),
                Choice::new("bacon", "Bacon", Money::from_cents(150)),
            ],
        }
    }

    fn size(&self, id: &str) -> DomainResult<&Choice> {
        self.sizes
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::validation(format!("unknown size '{id}'")))
    }

    fn extra(&self, id: &str) -> DomainResult<&Choice> {
        self.extras
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::validation(format!("unknown extra '{id}'")))
    }
}

/// What the customer picked in the customization dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub size: Option<String>,
    pub extras: Vec<String>,
}

impl Selection {
    pub fn size(mut self, id: impl Into<String>) -> Self {
        self.size = Some(id.into());
        self
    }

    pub fn extra(mut self, id: impl Into<String>) -> Self {
        self.extras.push(id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.extras.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    id: MenuItemId,
    restaurant_id: RestaurantId,
    name: String,
    description: String,
    price: Money,
    options: Option<CustomizationOptions>,
}

impl MenuItem {
    pub fn new(
        id: MenuItemId,
        restaurant_id: RestaurantId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("menu item name must not be empty"));
        }
        Ok(Self {
            id,
            restaurant_id,
            name,
            description: description.into(),
            price,
            options: None,
        })
    }

    pub fn with_options(mut self, options: CustomizationOptions) -> DomainResult<Self> {
        options.size(&options.default_size)?;
        self.options = Some(options);
        Ok(self)
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn is_customizable(&self) -> bool {
        self.options.is_some()
    }

    /// Turn a (possibly customized) dish into a cart line.
    ///
    /// The unit price includes every surcharge. Non-default choices are
    /// appended to the name so differently customized dishes stay separate
    /// lines in the cart.
    pub fn configure(&self, selection: &Selection, quantity: u32) -> DomainResult<LineItem> {
        let Some(options) = &self.options else {
            if !selection.is_empty() {
                return Err(DomainError::validation(format!(
                    "'{}' has no customization options",
                    self.name
                )));
            }
            return LineItem::new(self.name.clone(), self.price.amount(), quantity);
        };

        let mut unit_price = self.price;
        let mut labels: Vec<&str> = Vec::new();

        let size_id = selection.size.as_deref().unwrap_or(&options.default_size);
        let size = options.size(size_id)?;
        unit_price = unit_price.checked_add(size.surcharge)?;
        if size.id != options.default_size {
            labels.push(&size.label);
        }

        for (i, id) in selection.extras.iter().enumerate() {
            if selection.extras[..i].contains(id) {
                return Err(DomainError::validation(format!("extra '{id}' selected twice")));
            }
            let extra = options.extra(id)?;
            unit_price = unit_price.checked_add(extra.surcharge)?;
            labels.push(&extra.label);
        }

        let name = if labels.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, labels.join(", "))
        };
        LineItem::new(name, unit_price.amount(), quantity)
    }
}

impl<'de> Deserialize<'de> for MenuItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            id: MenuItemId,
            restaurant_id: RestaurantId,
            name: String,
            description: String,
            price: Money,
            options: Option<CustomizationOptions>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let item = MenuItem::new(raw.id, raw.restaurant_id, raw.name, raw.description, raw.price)
            .map_err(serde::de::Error::custom)?;
        match raw.options {
            Some(options) => item.with_options(options).map_err(serde::de::Error::custom),
            None => Ok(item),
        }
    }
}

impl Entity for MenuItem {
    type Id = MenuItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
