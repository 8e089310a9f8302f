//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// create a new one with the new values.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (two with the same values are equal)
/// - **Entity**: has identity (two with the same id are the same entity)
///
/// Example:
/// - `AttributeTypeDefinition { name: "operating-hours", .. }` carried by a
///   registry snapshot is a value object
/// - `Location { id: LocationId(...), name: "..." }` is an entity
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
