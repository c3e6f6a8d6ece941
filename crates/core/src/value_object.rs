//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (`Amount { value: 5.0, currency: EUR }`)
/// - **Entity**: has identity (`Product { id: 100, .. }`)
///
/// Value objects are immutable: to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Amount {
///     value: Decimal,
///     currency: Currency,
/// }
///
/// impl ValueObject for Amount {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
