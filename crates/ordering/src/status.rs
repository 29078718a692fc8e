use core::str::FromStr;

use serde::{Deserialize, Serialize};

use foodflow_core::{DomainError, DomainResult};

/// Fulfillment status of an order.
///
/// Totally ordered by ordinal: `Placed < InKitchen < OutForDelivery < Delivered`.
/// Orders start at `Placed`, only ever move forward one step at a time, and
/// stop at `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OrderStatus {
    Placed = 0,
    InKitchen = 1,
    OutForDelivery = 2,
    Delivered = 3,
}

/// How a tracker step renders relative to the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

impl OrderStatus {
    /// All statuses in fulfillment order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::InKitchen,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Placed => "Order Placed",
            OrderStatus::InKitchen => "In the Kitchen",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Icon key for the tracker step.
    pub fn icon(self) -> &'static str {
        match self {
            OrderStatus::Placed => "package-check",
            OrderStatus::InKitchen => "chef-hat",
            OrderStatus::OutForDelivery => "truck",
            OrderStatus::Delivered => "check-circle",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }

    /// The following status, or `None` at `Delivered`.
    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// The following status; `TerminalStatus` at `Delivered`.
    pub fn advance(self) -> DomainResult<Self> {
        self.next()
            .ok_or_else(|| DomainError::TerminalStatus(self.label().to_string()))
    }

    /// Classify this step relative to `current`.
    pub fn classify(self, current: OrderStatus) -> StepState {
        match self.ordinal().cmp(&current.ordinal()) {
            core::cmp::Ordering::Less => StepState::Completed,
            core::cmp::Ordering::Equal => StepState::Active,
            core::cmp::Ordering::Greater => StepState::Pending,
        }
    }
}

/// Classify `step` relative to the order's `current` status.
pub fn classify_step(step: OrderStatus, current: OrderStatus) -> StepState {
    step.classify(current)
}

/// Next status after `current`; fails with `TerminalStatus` at `Delivered`.
pub fn advance(current: OrderStatus) -> DomainResult<OrderStatus> {
    current.advance()
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    /// Accepts the snake_case name (`in_kitchen`) or the label (`In the Kitchen`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let key = wanted.to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| {
                status.label().eq_ignore_ascii_case(wanted) || snake_name(*status) == key
            })
            .ok_or_else(|| DomainError::validation(format!("unknown order status '{s}'")))
    }
}

fn snake_name(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Placed => "placed",
        OrderStatus::InKitchen => "in_kitchen",
        OrderStatus::OutForDelivery => "out_for_delivery",
        OrderStatus::Delivered => "delivered",
    }
}
