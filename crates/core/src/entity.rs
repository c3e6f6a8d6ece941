//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Reconciliation relies on this: two entities with the same id are the same
/// logical thing, whatever their other attributes say.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
