//! The customer's order history (profile page).

use chrono::NaiveDate;
use serde::Serialize;

use foodflow_core::{DomainError, DomainResult, Money};
use foodflow_pricing::PricingRules;

use crate::order::{Order, OrderNumber};
use crate::status::OrderStatus;
use crate::tracker::OrderTracker;

/// One row of the order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub number: OrderNumber,
    pub date: NaiveDate,
    pub restaurant: String,
    pub total: Money,
    pub status: OrderStatus,
    /// e.g. `["1x Margherita Pizza", "1x Garlic Bread"]`
    pub items: Vec<String>,
    pub tracker: OrderTracker,
}

/// In-memory list of a customer's placed orders.
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace (by order id) a placed order.
    pub fn record(&mut self, order: Order) -> DomainResult<()> {
        if !order.is_placed() {
            return Err(DomainError::validation(format!(
                "order {} has not been placed",
                order.id_typed()
            )));
        }
        match self
            .orders
            .iter_mut()
            .find(|o| o.id_typed() == order.id_typed())
        {
            Some(existing) => *existing = order,
            None => self.orders.push(order),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn find(&self, number: OrderNumber) -> Option<&Order> {
        self.orders.iter().find(|o| o.number() == Some(number))
    }

    /// Orders not yet delivered.
    pub fn in_progress(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| !o.status().is_terminal())
    }

    /// Summaries, newest first (ties broken by the higher order number).
    pub fn summaries(&self, rules: &PricingRules) -> DomainResult<Vec<OrderSummary>> {
        let mut orders: Vec<&Order> = self.orders.iter().collect();
        orders.sort_by(|a, b| {
            b.placed_at()
                .cmp(&a.placed_at())
                .then_with(|| b.number().cmp(&a.number()))
        });

        orders
            .into_iter()
            .filter_map(|order| {
                let number = order.number()?;
                let placed_at = order.placed_at()?;
                Some((order, number, placed_at))
            })
            .map(|(order, number, placed_at)| {
                Ok(OrderSummary {
                    number,
                    date: placed_at.date_naive(),
                    restaurant: order.restaurant_name().to_string(),
                    total: order.pricing(rules)?.total,
                    status: order.status(),
                    items: order.lines().iter().map(|l| l.label()).collect(),
                    tracker: order.tracker(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use foodflow_core::{Aggregate, AggregateId, CustomerId, RestaurantId};
    use foodflow_pricing::LineItem;
    use rust_decimal::Decimal;

    use crate::checkout::{DeliveryDetails, PaymentMethod};
    use crate::order::{OrderCommand, OrderId, PlaceOrder};

    fn placed(number: u32) -> Order {
        let order_id = OrderId::new(AggregateId::new());
        let mut order = Order::empty(order_id);
        order
            .execute(&OrderCommand::PlaceOrder(PlaceOrder {
                order_id,
                number: OrderNumber::new(number),
                customer_id: CustomerId::new(),
                restaurant_id: RestaurantId::new(),
                restaurant_name: "Green Bowl".into(),
                lines: vec![LineItem::new("Salad", Decimal::new(899, 2), 1).unwrap()],
                delivery: DeliveryDetails {
                    full_name: "Alex Doe".into(),
                    address: "123 Flavor St".into(),
                    city: "Foodville".into(),
                    zip_code: "12345".into(),
                    phone: "1234567890".into(),
                },
                payment_method: PaymentMethod::CreditCard,
                promotion: None,
                occurred_at: Utc::now(),
            }))
            .unwrap();
        order
    }

    #[test]
    fn unplaced_orders_are_rejected() {
        let mut history = OrderHistory::new();
        let err = history
            .record(Order::empty(OrderId::new(AggregateId::new())))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("not been placed")));
        assert!(history.is_empty());
    }

    #[test]
    fn recording_again_replaces_the_entry() {
        let mut history = OrderHistory::new();
        let order = placed(98765);
        history.record(order.clone()).unwrap();
        history.record(order).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.find(OrderNumber::new(98765)).is_some());
    }
}
