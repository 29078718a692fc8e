//! Progress-indicator metadata for the order tracker.

use serde::Serialize;

use crate::status::{OrderStatus, StepState};

/// One step of the tracker as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub icon: &'static str,
    pub state: StepState,
    /// Whether the connector line after this step is drawn as filled.
    /// `None` for the last step, which has no connector.
    pub connector_filled: Option<bool>,
}

/// The four-step tracker for an order's current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTracker {
    pub current: OrderStatus,
    pub steps: Vec<TrackerStep>,
}

impl OrderTracker {
    pub fn for_status(current: OrderStatus) -> Self {
        let last = OrderStatus::ALL.len() - 1;
        let steps = OrderStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, &status)| {
                let state = status.classify(current);
                TrackerStep {
                    status,
                    label: status.label(),
                    icon: status.icon(),
                    state,
                    connector_filled: (i < last).then_some(state == StepState::Completed),
                }
            })
            .collect();
        Self { current, steps }
    }

    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.state == StepState::Completed)
            .count()
    }

    pub fn active_step(&self) -> Option<&TrackerStep> {
        self.steps.iter().find(|s| s.state == StepState::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_kitchen_tracker() {
        let tracker = OrderTracker::for_status(OrderStatus::InKitchen);
        let states: Vec<StepState> = tracker.steps.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                StepState::Completed,
                StepState::Active,
                StepState::Pending,
                StepState::Pending
            ]
        );
        let connectors: Vec<Option<bool>> =
            tracker.steps.iter().map(|s| s.connector_filled).collect();
        assert_eq!(connectors, vec![Some(true), Some(false), Some(false), None]);
        assert_eq!(tracker.active_step().unwrap().label, "In the Kitchen");
        assert_eq!(tracker.completed_steps(), 1);
    }

    #[test]
    fn delivered_tracker_has_every_earlier_step_completed() {
        let tracker = OrderTracker::for_status(OrderStatus::Delivered);
        assert_eq!(tracker.completed_steps(), 3);
        assert_eq!(tracker.active_step().unwrap().status, OrderStatus::Delivered);
        assert_eq!(tracker.steps[0].icon, "package-check");
    }
}
