use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodflow_core::{
    Aggregate, AggregateId, AggregateRoot, CustomerId, DomainError, DomainResult, RestaurantId,
};
use foodflow_pricing::{LineItem, PricingBreakdown, PricingRules, Promotion};

use crate::checkout::{DeliveryDetails, PaymentMethod};
use crate::status::OrderStatus;
use crate::tracker::OrderTracker;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Customer-facing order number, shown as `FLW-98765`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(u32);

impl OrderNumber {
    pub const PREFIX: &'static str = "FLW-";

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{:05}", Self::PREFIX, self.0)
    }
}

impl FromStr for OrderNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix(Self::PREFIX).ok_or_else(|| {
            DomainError::invalid_id(format!("OrderNumber: missing prefix in '{s}'"))
        })?;
        let value = digits
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_id(format!("OrderNumber: {e}")))?;
        Ok(Self(value))
    }
}

/// Aggregate root: Order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    number: Option<OrderNumber>,
    customer_id: Option<CustomerId>,
    restaurant_id: Option<RestaurantId>,
    restaurant_name: String,
    status: OrderStatus,
    lines: Vec<LineItem>,
    delivery: Option<DeliveryDetails>,
    payment_method: PaymentMethod,
    promotion: Option<Promotion>,
    placed_at: Option<DateTime<Utc>>,
    version: u64,
    placed: bool,
}

impl Order {
    /// Create an empty, not-yet-placed aggregate instance for rehydration.
    pub fn empty(id: OrderId) -> Self {
        Self {
            id,
            number: None,
            customer_id: None,
            restaurant_id: None,
            restaurant_name: String::new(),
            status: OrderStatus::Placed,
            lines: Vec::new(),
            delivery: None,
            payment_method: PaymentMethod::default(),
            promotion: None,
            placed_at: None,
            version: 0,
            placed: false,
        }
    }

    /// Rebuild an order from its event stream.
    pub fn from_events<'a>(id: OrderId, events: impl IntoIterator<Item = &'a OrderEvent>) -> Self {
        let mut order = Self::empty(id);
        for event in events {
            order.apply(event);
        }
        order
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn number(&self) -> Option<OrderNumber> {
        self.number
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn restaurant_id(&self) -> Option<RestaurantId> {
        self.restaurant_id
    }

    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn delivery(&self) -> Option<&DeliveryDetails> {
        self.delivery.as_ref()
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    pub fn placed_at(&self) -> Option<DateTime<Utc>> {
        self.placed_at
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Totals recomputed from the order lines and the promotion used at checkout.
    pub fn pricing(&self, rules: &PricingRules) -> DomainResult<PricingBreakdown> {
        rules.quote_with_discount(&self.lines, self.promotion.as_ref().map(Promotion::rule))
    }

    pub fn tracker(&self) -> OrderTracker {
        OrderTracker::for_status(self.status)
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: PlaceOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub number: OrderNumber,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub lines: Vec<LineItem>,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub promotion: Option<Promotion>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdvanceStatus (issued by the fulfillment process).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceStatus {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    PlaceOrder(PlaceOrder),
    AdvanceStatus(AdvanceStatus),
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub number: OrderNumber,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub lines: Vec<LineItem>,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub promotion: Option<Promotion>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StatusAdvanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAdvanced {
    pub order_id: OrderId,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
    StatusAdvanced(StatusAdvanced),
}

impl OrderEvent {
    /// Stable event name.
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "ordering.order.placed",
            OrderEvent::StatusAdvanced(_) => "ordering.order.status_advanced",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_at,
            OrderEvent::StatusAdvanced(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Order {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderPlaced(e) => {
                self.id = e.order_id;
                self.number = Some(e.number);
                self.customer_id = Some(e.customer_id);
                self.restaurant_id = Some(e.restaurant_id);
                self.restaurant_name = e.restaurant_name.clone();
                self.status = OrderStatus::Placed;
                self.lines = e.lines.clone();
                self.delivery = Some(e.delivery.clone());
                self.payment_method = e.payment_method;
                self.promotion = e.promotion.clone();
                self.placed_at = Some(e.occurred_at);
                self.placed = true;
            }
            OrderEvent::StatusAdvanced(e) => {
                self.status = e.to;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::PlaceOrder(cmd) => self.handle_place(cmd),
            OrderCommand::AdvanceStatus(cmd) => self.handle_advance(cmd),
        }
    }
}

impl Order {
    fn ensure_order_id(&self, order_id: OrderId) -> Result<(), DomainError> {
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        Ok(())
    }

    fn handle_place(&self, cmd: &PlaceOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if self.placed {
            return Err(DomainError::conflict("order already placed"));
        }
        self.ensure_order_id(cmd.order_id)?;

        if cmd.lines.is_empty() {
            return Err(DomainError::validation("cannot place order without items"));
        }
        for line in &cmd.lines {
            line.validate()?;
        }
        cmd.delivery.validate()?;
        if let Some(promotion) = &cmd.promotion {
            promotion.rule().validate()?;
        }

        Ok(vec![OrderEvent::OrderPlaced(OrderPlaced {
            order_id: cmd.order_id,
            number: cmd.number,
            customer_id: cmd.customer_id,
            restaurant_id: cmd.restaurant_id,
            restaurant_name: cmd.restaurant_name.clone(),
            lines: cmd.lines.clone(),
            delivery: cmd.delivery.clone(),
            payment_method: cmd.payment_method,
            promotion: cmd.promotion.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_advance(&self, cmd: &AdvanceStatus) -> Result<Vec<OrderEvent>, DomainError> {
        if !self.placed {
            return Err(DomainError::not_found());
        }
        self.ensure_order_id(cmd.order_id)?;

        let next = self.status.advance()?;

        Ok(vec![OrderEvent::StatusAdvanced(StatusAdvanced {
            order_id: cmd.order_id,
            from: self.status,
            to: next,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn test_order_id() -> OrderId {
        OrderId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_delivery() -> DeliveryDetails {
        DeliveryDetails {
            full_name: "Alex Doe".into(),
            address: "123 Flavor St".into(),
            city: "Foodville".into(),
            zip_code: "12345".into(),
            phone: "1234567890".into(),
        }
    }

    fn place_cmd(order_id: OrderId) -> PlaceOrder {
        PlaceOrder {
            order_id,
            number: OrderNumber::new(98765),
            customer_id: CustomerId::new(),
            restaurant_id: RestaurantId::new(),
            restaurant_name: "The Grand Pizzeria".into(),
            lines: vec![
                LineItem::new("Margherita Pizza", Decimal::new(1299, 2), 1).unwrap(),
                LineItem::new("Garlic Bread", Decimal::new(450, 2), 2).unwrap(),
            ],
            delivery: test_delivery(),
            payment_method: PaymentMethod::CreditCard,
            promotion: None,
            occurred_at: test_time(),
        }
    }

    fn advance_cmd(order_id: OrderId) -> OrderCommand {
        OrderCommand::AdvanceStatus(AdvanceStatus {
            order_id,
            occurred_at: test_time(),
        })
    }

    fn placed_order() -> Order {
        let order_id = test_order_id();
        let mut order = Order::empty(order_id);
        order
            .execute(&OrderCommand::PlaceOrder(place_cmd(order_id)))
            .unwrap();
        order
    }

    #[test]
    fn place_order_emits_order_placed_event() {
        let order_id = test_order_id();
        let order = Order::empty(order_id);
        let events = order
            .handle(&OrderCommand::PlaceOrder(place_cmd(order_id)))
            .unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            OrderEvent::OrderPlaced(e) => {
                assert_eq!(e.order_id, order_id);
                assert_eq!(e.lines.len(), 2);
                assert_eq!(e.number.to_string(), "FLW-98765");
            }
            _ => panic!("Expected OrderPlaced event"),
        }
        assert_eq!(events[0].event_type(), "ordering.order.placed");
    }

    #[test]
    fn cannot_place_twice() {
        let order = placed_order();
        let err = order
            .handle(&OrderCommand::PlaceOrder(place_cmd(order.id_typed())))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn cannot_place_without_items() {
        let order_id = test_order_id();
        let mut cmd = place_cmd(order_id);
        cmd.lines.clear();
        let err = Order::empty(order_id)
            .handle(&OrderCommand::PlaceOrder(cmd))
            .unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("without items") => {}
            _ => panic!("Expected Validation for empty order"),
        }
    }

    #[test]
    fn cannot_place_with_invalid_line() {
        let order_id = test_order_id();
        let mut cmd = place_cmd(order_id);
        cmd.lines[0].quantity = 0;
        let err = Order::empty(order_id)
            .handle(&OrderCommand::PlaceOrder(cmd))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidLineItem(_)));
    }

    #[test]
    fn cannot_advance_unplaced_order() {
        let order_id = test_order_id();
        let err = Order::empty(order_id)
            .handle(&advance_cmd(order_id))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn advance_rejects_foreign_order_id() {
        let order = placed_order();
        let err = order.handle(&advance_cmd(test_order_id())).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn full_lifecycle_placed_to_delivered() {
        let mut order = placed_order();
        let id = order.id_typed();
        assert_eq!(order.status(), OrderStatus::Placed);

        for expected in [
            OrderStatus::InKitchen,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            let events = order.execute(&advance_cmd(id)).unwrap();
            match &events[0] {
                OrderEvent::StatusAdvanced(e) => assert_eq!(e.to, expected),
                _ => panic!("Expected StatusAdvanced event"),
            }
            assert_eq!(order.status(), expected);
        }

        let err = order.handle(&advance_cmd(id)).unwrap_err();
        assert_eq!(err, DomainError::TerminalStatus("Delivered".into()));
        assert_eq!(order.version(), 4);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let order = placed_order();
        let before = order.clone();

        let events1 = order.handle(&advance_cmd(order.id_typed())).unwrap();
        let events2 = order.handle(&advance_cmd(order.id_typed())).unwrap();

        assert_eq!(order, before);
        assert_eq!(events1.len(), events2.len());
    }

    #[test]
    fn apply_is_deterministic() {
        let order = placed_order();
        let order_id = order.id_typed();
        let mut source = order.clone();
        let mut events = vec![OrderEvent::OrderPlaced(OrderPlaced {
            order_id,
            number: OrderNumber::new(1),
            customer_id: CustomerId::new(),
            restaurant_id: RestaurantId::new(),
            restaurant_name: "Sushi Central".into(),
            lines: order.lines().to_vec(),
            delivery: test_delivery(),
            payment_method: PaymentMethod::PayPal,
            promotion: None,
            occurred_at: test_time(),
        })];
        events.extend(source.execute(&advance_cmd(order_id)).unwrap());

        let order1 = Order::from_events(order_id, &events);
        let order2 = Order::from_events(order_id, &events);

        assert_eq!(order1, order2);
        assert_eq!(order1.status(), OrderStatus::InKitchen);
        assert_eq!(order1.version(), 2);
        assert_eq!(order1.payment_method(), PaymentMethod::PayPal);
    }

    #[test]
    fn pricing_is_recomputed_from_lines() {
        let order = placed_order();
        let b = order.pricing(&PricingRules::default()).unwrap();
        assert_eq!(b.subtotal.to_string(), "$21.99");
        assert_eq!(b.total.to_string(), "$28.75");
    }

    #[test]
    fn order_number_parsing() {
        assert_eq!("FLW-98765".parse::<OrderNumber>().unwrap(), OrderNumber::new(98765));
        assert_eq!(OrderNumber::new(42).to_string(), "FLW-00042");
        assert!(matches!(
            "98765".parse::<OrderNumber>(),
            Err(DomainError::InvalidId(_))
        ));
        assert!(matches!(
            "FLW-abc".parse::<OrderNumber>(),
            Err(DomainError::InvalidId(_))
        ));
    }
}
