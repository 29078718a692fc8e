//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic input or invariant failure: none of them
/// is retryable, the caller has to supply corrected input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a malformed checkout form field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. placing an order twice).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A line item had a negative unit price or a zero quantity.
    #[error("invalid line item: {0}")]
    InvalidLineItem(String),

    /// A tax rate outside `[0, 1]`.
    #[error("invalid tax rate: {0} (must be within [0, 1])")]
    InvalidTaxRate(String),

    /// A negative delivery fee.
    #[error("invalid delivery fee: {0} (must not be negative)")]
    InvalidDeliveryFee(String),

    /// A malformed discount rule (negative amount, percentage above 100%).
    #[error("invalid discount: {0}")]
    InvalidDiscount(String),

    /// A promo code that is not in the promotion book.
    #[error("unknown promo code: {0}")]
    UnknownPromoCode(String),

    /// Attempted to advance an order that already reached its final status.
    #[error("order status {0} is terminal")]
    TerminalStatus(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn invalid_line_item(msg: impl Into<String>) -> Self {
        Self::InvalidLineItem(msg.into())
    }

    pub fn invalid_discount(msg: impl Into<String>) -> Self {
        Self::InvalidDiscount(msg.into())
    }

    /// Whether the error is one of the checkout input failures the UI should
    /// show next to the offending field rather than as a generic failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidLineItem(_)
                | Self::InvalidTaxRate(_)
                | Self::InvalidDeliveryFee(_)
                | Self::InvalidDiscount(_)
                | Self::UnknownPromoCode(_)
        )
    }
}
