//! `locus-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;
pub mod violation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AttributeTypeId, LocationId};
pub use value_object::ValueObject;
pub use violation::{Violation, ViolationCode, Violations};
