use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use foodflow_core::{DomainError, DomainResult, Entity, RestaurantId};

/// Minutes added to a restaurant's base delivery time for the upper bound of
/// the window shown to customers.
pub const DELIVERY_WINDOW_SPREAD_MINUTES: u32 = 10;

/// How many cuisine badges a listing card shows before collapsing into `+N`.
pub const MAX_CUISINE_BADGES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Restaurant {
    id: RestaurantId,
    name: String,
    /// Average rating on a 0-5 scale.
    rating: Decimal,
    cuisines: Vec<String>,
    delivery_minutes: u32,
}

impl Restaurant {
    pub fn new(
        id: RestaurantId,
        name: impl Into<String>,
        rating: Decimal,
        cuisines: Vec<String>,
        delivery_minutes: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("restaurant name must not be empty"));
        }
        if rating < Decimal::ZERO || rating > Decimal::from(5) {
            return Err(DomainError::validation(format!(
                "rating must be within [0, 5] (got {rating})"
            )));
        }
        Ok(Self {
            id,
            name,
            rating,
            cuisines,
            delivery_minutes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> Decimal {
        self.rating
    }

    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    pub fn delivery_minutes(&self) -> u32 {
        self.delivery_minutes
    }

    /// Estimated delivery window in minutes, e.g. `(25, 35)`.
    pub fn delivery_window(&self) -> (u32, u32) {
        (
            self.delivery_minutes,
            self.delivery_minutes.saturating_add(DELIVERY_WINDOW_SPREAD_MINUTES),
        )
    }

    /// Cuisine badges to show on a card and the number of hidden ones.
    pub fn cuisine_badges(&self) -> (&[String], usize) {
        let shown = self.cuisines.len().min(MAX_CUISINE_BADGES);
        (&self.cuisines[..shown], self.cuisines.len() - shown)
    }

    pub fn serves(&self, slug: &str) -> bool {
        let wanted = cuisine_slug(slug);
        self.cuisines.iter().any(|c| cuisine_slug(c) == wanted)
    }
}

impl<'de> Deserialize<'de> for Restaurant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            id: RestaurantId,
            name: String,
            rating: Decimal,
            cuisines: Vec<String>,
            delivery_minutes: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Restaurant::new(raw.id, raw.name, raw.rating, raw.cuisines, raw.delivery_minutes)
            .map_err(serde::de::Error::custom)
    }
}

impl Entity for Restaurant {
    type Id = RestaurantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// URL slug for a cuisine name: `"Fast Food"` becomes `"fast-food"`.
pub fn cuisine_slug(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Highest rated first.
    #[default]
    Rating,
    /// Fastest delivery first.
    DeliveryTime,
}

/// Listing-page filter: an optional cuisine, an optional minimum rating and a
/// sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantQuery {
    pub cuisine: Option<String>,
    pub min_rating: Option<Decimal>,
    pub sort: SortOrder,
}

impl RestaurantQuery {
    pub fn cuisine(mut self, slug: impl Into<String>) -> Self {
        self.cuisine = Some(slug.into());
        self
    }

    pub fn min_rating(mut self, rating: Decimal) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// The "Top Rated" filter: 4.5 or better.
    pub fn top_rated(self) -> Self {
        self.min_rating(Decimal::new(45, 1))
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Filter and sort. Ties keep the input order.
    pub fn apply<'a>(&self, restaurants: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        let mut matches: Vec<&Restaurant> = restaurants
            .iter()
            .filter(|r| self.cuisine.as_deref().is_none_or(|slug| r.serves(slug)))
            .filter(|r| self.min_rating.is_none_or(|min| r.rating >= min))
            .collect();

        match self.sort {
            SortOrder::Rating => matches.sort_by(|a, b| b.rating.cmp(&a.rating)),
            SortOrder::DeliveryTime => matches.sort_by_key(|r| r.delivery_minutes),
        }
        matches
    }
}
