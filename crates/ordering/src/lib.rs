//! Ordering domain module (event-sourced).
//!
//! Cart, checkout, the order aggregate and its fulfillment status, and the
//! customer's order history. Deterministic domain logic only (no IO, no
//! storage); pricing is always recomputed from the order lines.

pub mod cart;
pub mod checkout;
pub mod history;
pub mod order;
pub mod status;
pub mod tracker;

pub use cart::{Cart, CartAction};
pub use checkout::{Checkout, DeliveryDetails, PaymentMethod};
pub use history::{OrderHistory, OrderSummary};
pub use order::{
    AdvanceStatus, Order, OrderCommand, OrderEvent, OrderId, OrderNumber, OrderPlaced, PlaceOrder,
    StatusAdvanced,
};
pub use status::{OrderStatus, StepState, advance, classify_step};
pub use tracker::{OrderTracker, TrackerStep};
