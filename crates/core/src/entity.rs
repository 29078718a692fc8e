//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Restaurants and menu items are entities: two menu items with the same name
/// and price are still different dishes if their ids differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Identity comparison, ignoring every other attribute.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
