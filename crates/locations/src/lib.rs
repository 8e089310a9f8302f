//! Locations domain module (hierarchical places with custom attributes).
//!
//! This crate contains the `Location` entity and the pre-persistence
//! validation rules for it, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage). Collaborators - the name/id lookup and the
//! attribute type registry - are injected as traits.

pub mod location;
pub mod lookup;
pub mod validator;

pub use location::Location;
pub use lookup::{LocationLookup, LookupError};
pub use validator::{
    DESCRIPTION_MAX_LEN, LocationValidator, NAME_MAX_LEN, ValidateError,
};
