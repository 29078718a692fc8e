//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Money amounts,
/// line items and pricing breakdowns are value objects: to "change" one, build
/// a new one. This is what lets the cart be threaded through a reducer and the
/// pricing calculator be called from any number of rendering contexts.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct LineItem {
///     name: String,
///     unit_price: Decimal,
///     quantity: u32,
/// }
///
/// impl ValueObject for LineItem {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
