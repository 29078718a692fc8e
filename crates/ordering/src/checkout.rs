use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodflow_core::{CustomerId, DomainError, DomainResult, RestaurantId, ValueObject};
use foodflow_pricing::{PricingBreakdown, PricingRules, PromoBook};

use crate::cart::Cart;
use crate::order::{OrderId, OrderNumber, PlaceOrder};

/// Delivery information entered on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub phone: String,
}

impl DeliveryDetails {
    /// Field rules: minimum lengths after trimming surrounding whitespace.
    pub fn validate(&self) -> DomainResult<()> {
        let fields: [(&str, &str, usize, &str); 5] = [
            (self.full_name.as_str(), "full name", 2, "must be at least 2 characters"),
            (self.address.as_str(), "address", 5, "must be a valid street address"),
            (self.city.as_str(), "city", 2, "must be a valid city"),
            (self.zip_code.as_str(), "ZIP code", 5, "must be a valid ZIP code"),
            (self.phone.as_str(), "phone number", 10, "must be a valid phone number"),
        ];
        for (value, field, min, message) in fields {
            if value.trim().chars().count() < min {
                return Err(DomainError::validation(format!("{field} {message}")));
            }
        }
        Ok(())
    }
}

impl ValueObject for DeliveryDetails {}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
}

/// Everything the checkout page submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub cart: Cart,
    pub delivery: DeliveryDetails,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Raw promo-code field; blank means none.
    #[serde(default)]
    pub promo_code: Option<String>,
}

impl Checkout {
    /// Order summary shown next to the form.
    pub fn quote(
        &self,
        rules: &PricingRules,
        promos: &PromoBook,
    ) -> DomainResult<PricingBreakdown> {
        let promotion = promos.resolve(self.promo_code.as_deref())?;
        rules.quote_with_discount(self.cart.lines(), promotion.map(|p| p.rule()))
    }

    /// Validate the form and build the command that places the order.
    pub fn place(
        &self,
        promos: &PromoBook,
        order_id: OrderId,
        number: OrderNumber,
        customer_id: CustomerId,
        restaurant: (RestaurantId, &str),
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<PlaceOrder> {
        if self.cart.is_empty() {
            return Err(DomainError::validation("cannot place an order with an empty cart"));
        }
        self.delivery.validate()?;
        let promotion = promos.resolve(self.promo_code.as_deref())?.cloned();

        let (restaurant_id, restaurant_name) = restaurant;
        Ok(PlaceOrder {
            order_id,
            number,
            customer_id,
            restaurant_id,
            restaurant_name: restaurant_name.to_string(),
            lines: self.cart.lines().to_vec(),
            delivery: self.delivery.clone(),
            payment_method: self.payment_method,
            promotion,
            occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use foodflow_core::AggregateId;
    use foodflow_pricing::{DiscountRule, LineItem, Promotion};
    use rust_decimal::Decimal;

    fn details() -> DeliveryDetails {
        DeliveryDetails {
            full_name: "Alex Doe".into(),
            address: "123 Flavor St".into(),
            city: "Foodville".into(),
            zip_code: "12345".into(),
            phone: "(123) 456-7890".into(),
        }
    }

    fn checkout(promo: Option<&str>) -> Checkout {
        let cart: Cart = vec![
            LineItem::new("Pizza", Decimal::from_str("12.99").unwrap(), 1).unwrap(),
            LineItem::new("Bread", Decimal::from_str("4.50").unwrap(), 2).unwrap(),
        ]
        .into_iter()
        .collect();
        Checkout {
            cart,
            delivery: details(),
            payment_method: PaymentMethod::default(),
            promo_code: promo.map(str::to_string),
        }
    }

    fn promos() -> PromoBook {
        PromoBook::new().with(
            Promotion::new("WELCOME", DiscountRule::FixedAmount(Decimal::from(3))).unwrap(),
        )
    }

    #[test]
    fn valid_details_pass() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn short_fields_are_rejected_with_field_name() {
        let mut d = details();
        d.zip_code = " 123 ".into();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.starts_with("ZIP code")));

        let mut d = details();
        d.phone = "555-0100".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn quote_applies_promo_code() {
        let b = checkout(Some("welcome"))
            .quote(&PricingRules::default(), &promos())
            .unwrap();
        assert_eq!(b.items_subtotal.to_string(), "$21.99");
        assert_eq!(b.discount.to_string(), "$3.00");
        assert_eq!(b.subtotal.to_string(), "$18.99");
        // 18.99 * 0.08 = 1.5192
        assert_eq!(b.taxes.to_string(), "$1.52");
        assert_eq!(b.total.to_string(), "$25.51");
    }

    #[test]
    fn unknown_promo_blocks_placement() {
        let err = checkout(Some("nope"))
            .place(
                &promos(),
                OrderId::new(AggregateId::new()),
                OrderNumber::new(98765),
                CustomerId::new(),
                (RestaurantId::new(), "The Grand Pizzeria"),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownPromoCode(_)));
    }

    #[test]
    fn empty_cart_cannot_be_placed() {
        let mut c = checkout(None);
        c.cart = Cart::new();
        let err = c
            .place(
                &promos(),
                OrderId::new(AggregateId::new()),
                OrderNumber::new(1),
                CustomerId::new(),
                (RestaurantId::new(), "Burger Hub"),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn payment_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"credit-card\""
        );
        assert_eq!(serde_json::to_string(&PaymentMethod::PayPal).unwrap(), "\"paypal\"");
    }
}
